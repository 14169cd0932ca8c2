use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use super::{WizardEvent, WizardEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, wizard_id: Uuid, kind: WizardEventKind) -> WizardEvent;
    /// Lista eventos de un wizard (orden ascendente por seq).
    fn list(&self, wizard_id: Uuid) -> Vec<WizardEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<WizardEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, wizard_id: Uuid, kind: WizardEventKind) -> WizardEvent {
        let vec = self.inner.entry(wizard_id).or_default();
        let ev = WizardEvent { seq: vec.len() as u64,
                               wizard_id,
                               kind,
                               ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, wizard_id: Uuid) -> Vec<WizardEvent> {
        self.inner.get(&wizard_id).cloned().unwrap_or_default()
    }
}
