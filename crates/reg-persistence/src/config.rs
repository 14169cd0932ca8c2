//! Ubicación de los ficheros de persistencia desde variables de entorno.
//! Convención: `REGISTRATION_STORE_DIR` (por defecto `./data/registrations`).

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const STORE_DIR_VAR: &str = "REGISTRATION_STORE_DIR";
pub const DEFAULT_STORE_DIR: &str = "./data/registrations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let root = env::var(STORE_DIR_VAR).ok()
                                          .filter(|v| !v.trim().is_empty())
                                          .unwrap_or_else(|| DEFAULT_STORE_DIR.to_string());
        Self::new(root)
    }

    pub fn records_dir(&self) -> PathBuf {
        self.root.join("records")
    }

    pub fn events_dir(&self) -> PathBuf {
        self.root.join("events")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
