//! reg-adapters: colaboradores externos del wizard.
//!
//! - `gateway`: servicio de registro simulado (`RegistrationGateway`).
//! - `loader`: carga con cadena de fallback (API → fichero → datos fijos).
//! - `reference`: datos de referencia inyectados.
//! - `tabs`: pestañas sincronizadas con el fragmento de URL.
pub mod error;
pub mod gateway;
pub mod loader;
pub mod reference;
pub mod tabs;

pub use error::{AdapterError, SourceFailure, Unavailable};
pub use gateway::SimulatedGateway;
pub use loader::{DataSource, FallbackLoader, JsonFileSource, Loaded, StaticSource};
pub use reference::{ReferenceProvider, StaticReference};
pub use tabs::{FragmentStore, FragmentSync, MemoryFragment, TabSet};
