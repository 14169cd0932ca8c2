//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y construye `AppConfig`.
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use reg_core::WizardError;
use reg_domain::{DomainError, EventContext};

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    Invalid { key: String, value: String },
    #[error("invalid event context: {0}")]
    Context(#[from] DomainError),
    #[error("invalid wizard definition: {0}")]
    Definition(#[from] WizardError),
    #[error("could not read stored registrations: {0}")]
    Storage(WizardError),
}

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub event_code: String,
    pub event_capacity: u32,
    pub event_price: u32,
    pub currency: String,
    pub submit_timeout: Duration,
    /// Latencia del servicio de registro simulado.
    pub gateway_latency: Duration,
    pub store_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { event_code: "EPRI".into(),
               event_capacity: 200,
               event_price: 1500,
               currency: "EGP".into(),
               submit_timeout: Duration::from_secs(reg_core::constants::DEFAULT_SUBMIT_TIMEOUT_SECS),
               gateway_latency: Duration::from_millis(250),
               store_dir: PathBuf::from(reg_persistence::config::DEFAULT_STORE_DIR) }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key: key.to_string(),
                                                                            value: raw.clone() }),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de `lookup`; las claves ausentes
    /// toman el valor por defecto.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let config = Self { event_code: lookup("REGISTRATION_EVENT_CODE").unwrap_or(defaults.event_code),
                            event_capacity: parse(&lookup, "REGISTRATION_EVENT_CAPACITY", defaults.event_capacity)?,
                            event_price: parse(&lookup, "REGISTRATION_EVENT_PRICE", defaults.event_price)?,
                            currency: lookup("REGISTRATION_CURRENCY").unwrap_or(defaults.currency),
                            submit_timeout: Duration::from_secs(parse(&lookup,
                                                                      "REGISTRATION_SUBMIT_TIMEOUT_SECS",
                                                                      defaults.submit_timeout.as_secs())?),
                            gateway_latency: Duration::from_millis(parse(&lookup,
                                                                         "REGISTRATION_GATEWAY_LATENCY_MS",
                                                                         defaults.gateway_latency.as_millis() as u64)?),
                            store_dir: lookup(reg_persistence::config::STORE_DIR_VAR).map(PathBuf::from)
                                                                                     .unwrap_or(defaults.store_dir) };
        Ok(config)
    }

    pub fn event_context(&self) -> Result<EventContext, ConfigError> {
        let title = reg_domain::LocalizedText::en_ar("EPRI Annual Conference", "المؤتمر السنوي لمعهد بحوث البترول");
        Ok(EventContext::new(&self.event_code, title, self.event_capacity, self.event_price, &self.currency)?)
    }

    pub fn store_config(&self) -> reg_persistence::StoreConfig {
        reg_persistence::StoreConfig::new(&self.store_dir)
    }
}
