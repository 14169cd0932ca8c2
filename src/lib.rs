//! Registro a la conferencia EPRI.
//!
//! Este crate une los crates del workspace:
//! - `config`: `AppConfig` desde variables de entorno (.env).
//! - `registration`: `RegistrationApp`, el wizard de inscripción listo para usar.
//! - `logging`: suscriptor para los binarios.

pub mod config;
pub mod logging;
pub mod registration;

pub use config::{AppConfig, ConfigError};
pub use logging::init_logging;
pub use registration::{RegistrationApp, RegistrationPipeline};
