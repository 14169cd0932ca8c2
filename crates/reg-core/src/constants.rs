//! Constantes del motor de registro.
//!
//! Agrupa límites usados por los validadores y por el pipeline de envío.
//! `ENGINE_VERSION` entra en el `definition_hash` de cada wizard: cambiarlo
//! invalida los eventos persistidos con una versión anterior.

/// Versión lógica del motor de wizards.
pub const ENGINE_VERSION: &str = "W1.0";

/// Tamaño máximo de un comprobante adjunto (10 MiB).
pub const MAX_RECEIPT_BYTES: u64 = 10 * 1024 * 1024;

/// Dígitos mínimos de un teléfono una vez eliminado el formato.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Timeout por defecto de la llamada externa de registro, en segundos.
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;
