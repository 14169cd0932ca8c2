//! Definiciones relacionadas a Steps.
//!
//! Un step es una pantalla del wizard: posee un subconjunto de campos y un
//! validador que debe pasar antes de avanzar. Este módulo define:
//! - `StepDefinition`: interfaz neutral usada por el wizard.
//! - `FieldStep`: implementación declarativa basada en `FieldRule`.
//! - `StepStatus`: estado de progreso para la capa de presentación.

mod definition;
mod field_step;
mod status;

pub use definition::StepDefinition;
pub use field_step::FieldStep;
pub use status::StepStatus;
