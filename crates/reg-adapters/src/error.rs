use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("io error on {path}: {message}")]
    Io { path: String, message: String },
    #[error("could not parse data: {0}")]
    Parse(String),
    #[error("source failed: {0}")]
    Source(String),
    #[error("unknown tab '{0}'")]
    UnknownTab(String),
    #[error("a tab set needs at least one tab")]
    EmptyTabSet,
}

/// Fallo de una fuente concreta dentro de una cadena de fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub error: AdapterError,
}

/// Ninguna fuente pudo entregar datos; `attempts` conserva el motivo de cada una.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("data unavailable after {} attempt(s)", .attempts.len())]
pub struct Unavailable {
    pub attempts: Vec<SourceFailure>,
}
