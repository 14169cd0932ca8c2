//! `EventStore` append-only sobre ficheros JSON-lines (`<wizard_id>.jsonl`).
//!
//! Las lecturas se sirven desde un espejo en memoria cargado al abrir. Un
//! fallo de escritura se registra y no interrumpe al wizard: el evento queda
//! en el espejo.
use log::{debug, error, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::PersistenceError;
use reg_core::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};

#[derive(Debug)]
pub struct JsonlEventStore {
    dir: PathBuf,
    mirror: InMemoryEventStore,
}

impl JsonlEventStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let mut mirror = InMemoryEventStore::default();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            let events = Self::read_log(&path)?;
            if let Some(first) = events.first() {
                mirror.inner.insert(first.wizard_id, events);
            }
        }
        debug!("event store opened at {} with {} wizard log(s)", dir.display(), mirror.inner.len());
        Ok(Self { dir, mirror })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, wizard_id: Uuid) -> PathBuf {
        self.dir.join(format!("{wizard_id}.jsonl"))
    }

    fn read_log(path: &Path) -> Result<Vec<WizardEvent>, PersistenceError> {
        let raw = fs::read_to_string(path)?;
        raw.lines()
           .filter(|l| !l.trim().is_empty())
           .enumerate()
           .map(|(n, line)| {
               serde_json::from_str(line).map_err(|e| PersistenceError::Corrupt { path: format!("{}:{}", path.display(), n + 1),
                                                                                  message: e.to_string() })
           })
           .collect()
    }

    fn append_line(&self, event: &WizardEvent) -> Result<(), PersistenceError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut file = OpenOptions::new().create(true)
                                         .append(true)
                                         .open(self.path_for(event.wizard_id))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl EventStore for JsonlEventStore {
    fn append_kind(&mut self, wizard_id: Uuid, kind: WizardEventKind) -> WizardEvent {
        let event = self.mirror.append_kind(wizard_id, kind);
        if let Err(e) = self.append_line(&event) {
            error!("could not append event seq={} for wizard {}: {}", event.seq, wizard_id, e);
            warn!("event log for wizard {} is only kept in memory", wizard_id);
        }
        event
    }

    fn list(&self, wizard_id: Uuid) -> Vec<WizardEvent> {
        self.mirror.list(wizard_id)
    }
}
