//! reg-persistence
//!
//! Implementaciones en disco de `RecordStore` y `EventStore`.
//!
//! Módulos:
//! - `records`: un JSON por `SubmissionRecord`.
//! - `events`: log JSON-lines por wizard.
//! - `config`: ubicación de los ficheros desde .env.

pub mod config;
pub mod error;
pub mod events;
pub mod records;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use events::JsonlEventStore;
pub use records::JsonFileRecordStore;

/// Abre ambos stores bajo la raíz configurada.
pub fn open_stores(config: &StoreConfig) -> Result<(JsonFileRecordStore, JsonlEventStore), PersistenceError> {
    Ok((JsonFileRecordStore::open(config.records_dir())?, JsonlEventStore::open(config.events_dir())?))
}
