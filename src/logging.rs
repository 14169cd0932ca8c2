//! Suscriptor de logs para los binarios. Las librerías sólo usan `log`; el
//! puente `tracing-log` del suscriptor los reenvía al formateador.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el suscriptor global (`RUST_LOG`, por defecto `info`). Llamarlo
/// dos veces no tiene efecto.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry().with(filter)
                                          .with(tracing_subscriber::fmt::layer())
                                          .try_init();
}
