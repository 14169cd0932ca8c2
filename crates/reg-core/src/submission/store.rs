use std::collections::HashMap;
use uuid::Uuid;

use super::SubmissionRecord;
use crate::errors::WizardError;

/// Persistencia de `SubmissionRecord`, indexada por id y consultable por ticket.
pub trait RecordStore {
    /// Inserta o reemplaza el registro con el mismo `id`.
    fn save(&mut self, record: &SubmissionRecord) -> Result<(), WizardError>;
    fn get(&self, id: Uuid) -> Result<Option<SubmissionRecord>, WizardError>;
    fn find_by_ticket(&self, ticket: &str) -> Result<Option<SubmissionRecord>, WizardError>;
    /// Todos los registros, del más antiguo al más reciente.
    fn list(&self) -> Result<Vec<SubmissionRecord>, WizardError>;
}

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    pub inner: HashMap<Uuid, SubmissionRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn save(&mut self, record: &SubmissionRecord) -> Result<(), WizardError> {
        self.inner.insert(record.id, record.clone());
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<SubmissionRecord>, WizardError> {
        Ok(self.inner.get(&id).cloned())
    }

    fn find_by_ticket(&self, ticket: &str) -> Result<Option<SubmissionRecord>, WizardError> {
        Ok(self.inner.values().find(|r| r.ticket() == Some(ticket)).cloned())
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, WizardError> {
        let mut all: Vec<SubmissionRecord> = self.inner.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }
}
