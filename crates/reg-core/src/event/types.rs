//! Tipos de evento del wizard y estructura `WizardEvent`.
//!
//! Cada transición aceptada y cada rechazo se registra en un `EventStore`
//! append-only. La capa de presentación puede leerlos para mostrar el motivo
//! de un rechazo; la persistencia puede guardarlos para auditoría.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::WizardError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEventKind {
    /// Primer evento de un wizard: fija la definición usada.
    Initialized { definition_hash: String, step_count: usize },
    FieldUpdated { field: String },
    FieldCleared { field: String },
    OptionSelected { field: String, option: String },
    /// `next()` aceptado.
    Advanced { from: usize, to: usize },
    /// `previous()` aceptado.
    Returned { from: usize, to: usize },
    Jumped { from: usize, to: usize },
    /// Cualquier operación rechazada, con su motivo.
    TransitionRejected { action: String, error: WizardError },
    SubmissionStarted { record_id: Uuid, attempt: u32, fingerprint: String },
    SubmissionCompleted { record_id: Uuid, ticket: String },
    SubmissionFailed { record_id: Uuid, error: WizardError },
}

impl WizardEventKind {
    /// Código compacto de una letra, útil para trazas y tests.
    pub fn code(&self) -> &'static str {
        match self {
            WizardEventKind::Initialized { .. } => "I",
            WizardEventKind::FieldUpdated { .. } => "U",
            WizardEventKind::FieldCleared { .. } => "D",
            WizardEventKind::OptionSelected { .. } => "O",
            WizardEventKind::Advanced { .. } => "N",
            WizardEventKind::Returned { .. } => "P",
            WizardEventKind::Jumped { .. } => "J",
            WizardEventKind::TransitionRejected { .. } => "X",
            WizardEventKind::SubmissionStarted { .. } => "S",
            WizardEventKind::SubmissionCompleted { .. } => "C",
            WizardEventKind::SubmissionFailed { .. } => "F",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub wizard_id: Uuid,
    pub kind: WizardEventKind,
    pub ts: DateTime<Utc>,
}
