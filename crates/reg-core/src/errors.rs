//! Errores del motor de wizards.
//!
//! Todos los errores locales (validación, opción deshabilitada, transición
//! rechazada) son recuperables: el wizard los devuelve como `Err` y además
//! los deja observables como estado (`last_rejection`) y como evento.
//! Sólo `Configuration` se considera un error de programación.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validate::FieldIssue;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum WizardError {
    #[error("step {step} has {} invalid field(s)", .issues.len())]
    Validation { step: usize, issues: Vec<FieldIssue> },
    #[error("option '{option}' of '{field}' is disabled")]
    DisabledOption { field: String, option: String },
    #[error("unknown option '{option}' for field '{field}'")]
    UnknownOption { field: String, option: String },
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("already at the first step")]
    AtFirstStep,
    #[error("final step reached; submit instead of advancing")]
    AtFinalStep,
    #[error("submission is only allowed from the final step")]
    NotAtFinalStep,
    #[error("invalid step index {0}")]
    InvalidStepIndex(usize),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("registration already submitted")]
    AlreadySubmitted,
    #[error("submission failed: {0}")]
    Submission(String),
    #[error("submission timed out after {0} ms")]
    Timeout(u64),
    #[error("storage: {0}")]
    Storage(String),
    #[error("invalid wizard configuration: {0}")]
    Configuration(String),
}

impl WizardError {
    /// Issues de campo asociados al error (vacío si no es de validación).
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            WizardError::Validation { issues, .. } => issues,
            _ => &[],
        }
    }

    /// `true` para los errores que el usuario puede resolver reintentando.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WizardError::Submission(_) | WizardError::Timeout(_) | WizardError::Storage(_))
    }
}
