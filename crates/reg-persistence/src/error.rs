//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas y éstas a `WizardError::Storage`.

use reg_core::WizardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("corrupt file {path}: {message}")]
    Corrupt { path: String, message: String },
}

impl From<PersistenceError> for WizardError {
    fn from(err: PersistenceError) -> Self {
        WizardError::Storage(err.to_string())
    }
}
