//! Validadores de campo: predicados puros y reglas declarativas.

mod predicates;
mod rule;

pub use predicates::{check_attachment, is_email, is_non_empty, is_phone, phone_digits};
pub use rule::{FieldIssue, FieldRule};
