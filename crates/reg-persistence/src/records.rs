//! `RecordStore` sobre ficheros: un JSON por registro (`<id>.json`).
//!
//! La escritura pasa por un fichero temporal y `rename`, de modo que un
//! lector nunca ve un registro a medio escribir.
use log::{debug, error, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::PersistenceError;
use reg_core::{RecordStore, SubmissionRecord, WizardError};

#[derive(Debug, Clone)]
pub struct JsonFileRecordStore {
    dir: PathBuf,
}

impl JsonFileRecordStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn read(path: &Path) -> Result<SubmissionRecord, PersistenceError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt { path: path.display().to_string(),
                                                                            message: e.to_string() })
    }

    fn write(&self, record: &SubmissionRecord) -> Result<(), PersistenceError> {
        let path = self.path_for(record.id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(record)?)?;
        fs::rename(&tmp, &path)?;
        debug!("record {} written to {}", record.id, path.display());
        Ok(())
    }

    /// Un fichero corrupto se omite con aviso; los errores de E/S sí se propagan.
    fn load_all(&self) -> Result<Vec<SubmissionRecord>, PersistenceError> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(record) => records.push(record),
                Err(e @ PersistenceError::Corrupt { .. }) => warn!("skipping record file: {}", e),
                Err(e) => return Err(e),
            }
        }
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}

impl RecordStore for JsonFileRecordStore {
    fn save(&mut self, record: &SubmissionRecord) -> Result<(), WizardError> {
        self.write(record).map_err(|e| {
                              error!("could not write record {}: {}", record.id, e);
                              e.into()
                          })
    }

    fn get(&self, id: Uuid) -> Result<Option<SubmissionRecord>, WizardError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(Self::read(&path)?))
    }

    fn find_by_ticket(&self, ticket: &str) -> Result<Option<SubmissionRecord>, WizardError> {
        Ok(self.load_all()?.into_iter().find(|r| r.ticket() == Some(ticket)))
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, WizardError> {
        Ok(self.load_all()?)
    }
}
