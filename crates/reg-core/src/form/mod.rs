//! Datos de formulario del wizard.

mod data;
mod value;

pub use data::FormData;
pub use value::{Attachment, FieldValue, MimeKind};
