use thiserror::Error;

/// Errores del dominio de registro.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    ValidationError(String),
    #[error("Valor desconocido: {0}")]
    UnknownValue(String),
    #[error("Campo ausente o de tipo incorrecto: {0}")]
    MissingField(String),
}
