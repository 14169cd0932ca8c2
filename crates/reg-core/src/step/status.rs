use serde::{Deserialize, Serialize};

/// Estado de un step para el indicador de progreso.
///
/// No refleja validez: la validez se recalcula en cada transición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Aún no alcanzado.
    Pending,
    /// Step actual.
    Active,
    /// Alcanzado antes y no es el actual.
    Visited,
}
