//! `SubmissionRecord`: artefacto terminal de una ejecución del wizard.
//!
//! Se crea una sola vez por wizard. Después de creado sólo cambian el estado
//! (`Pending → Completed` o `Pending → Failed`) y los datos de seguimiento
//! (intentos, último error, ticket al completar). Un reintento tras `Failed`
//! reutiliza el mismo registro (mismo `id`).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::FormData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    /// Identificador legible; se asigna al completar.
    pub ticket: Option<String>,
    /// Copia de los campos enviados.
    pub fields: FormData,
    pub status: SubmissionStatus,
    pub attempts: u32,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(fields: FormData) -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(),
               ticket: None,
               fields,
               status: SubmissionStatus::Pending,
               attempts: 0,
               last_error: None,
               created_at: now,
               updated_at: now }
    }

    /// Inicia un intento. En un reintento (registro `Failed`) la copia de
    /// campos se actualiza con el formulario vigente: ese registro nunca fue
    /// aceptado por el servicio externo.
    pub fn begin_attempt(&mut self, fields: &FormData) -> bool {
        if self.status == SubmissionStatus::Completed {
            return false;
        }
        if self.status == SubmissionStatus::Failed {
            self.fields = fields.clone();
        }
        self.status = SubmissionStatus::Pending;
        self.attempts += 1;
        self.last_error = None;
        self.updated_at = Utc::now();
        true
    }

    /// `Pending → Completed`. Devuelve `false` si el registro no estaba pendiente.
    pub fn complete(&mut self, ticket: impl Into<String>) -> bool {
        if self.status != SubmissionStatus::Pending {
            return false;
        }
        self.ticket = Some(ticket.into());
        self.status = SubmissionStatus::Completed;
        self.updated_at = Utc::now();
        true
    }

    /// `Pending → Failed`.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.status != SubmissionStatus::Pending {
            return false;
        }
        self.last_error = Some(error.into());
        self.status = SubmissionStatus::Failed;
        self.updated_at = Utc::now();
        true
    }

    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == SubmissionStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldValue;

    #[test]
    fn status_only_leaves_pending_once() {
        let mut r = SubmissionRecord::new(FormData::new());
        assert!(r.begin_attempt(&FormData::new()));
        assert!(r.fail("network down"));
        assert!(!r.complete("X-1"));
        assert_eq!(r.status, SubmissionStatus::Failed);

        let id = r.id;
        let mut fixed = FormData::new();
        fixed.set("email", FieldValue::text("bob@example.com"));
        assert!(r.begin_attempt(&fixed));
        assert_eq!(r.attempts, 2);
        assert_eq!(r.fields, fixed);
        assert!(r.complete("X-2"));
        assert_eq!(r.id, id);
        assert!(!r.begin_attempt(&FormData::new()));
        assert!(!r.fail("late"));
        assert_eq!(r.ticket(), Some("X-2"));
    }
}
