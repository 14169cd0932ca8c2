//! Predicados puros sobre valores individuales.
//!
//! No dependen del estado del wizard: reciben el valor (y, si aplica, sus
//! límites) y responden sí/no o un mensaje.
use crate::form::{Attachment, MimeKind};
use crate::constants::MIN_PHONE_DIGITS;

/// Texto no vacío tras recortar espacios.
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Forma `local@dominio.tld`, sin espacios en blanco.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !host.starts_with('.') && !host.ends_with('.')
}

/// Dígito ASCII o arábigo-índico (U+0660..U+0669, U+06F0..U+06F9).
fn is_phone_digit(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

/// Cantidad de dígitos en un teléfono; el resto de caracteres de formato se descarta.
pub fn phone_digits(value: &str) -> usize {
    value.chars().filter(|c| is_phone_digit(*c)).count()
}

/// Teléfono con al menos `MIN_PHONE_DIGITS` dígitos y sólo caracteres de formato habituales.
pub fn is_phone(value: &str) -> bool {
    let only_format = value.chars()
                           .all(|c| is_phone_digit(c) || matches!(c, '+' | ' ' | '-' | '(' | ')' | '.'));
    only_format && phone_digits(value) >= MIN_PHONE_DIGITS
}

/// Restricciones de archivo: tamaño y tipo MIME permitido.
pub fn check_attachment(attachment: &Attachment, max_bytes: u64, allowed: &[MimeKind]) -> Result<(), String> {
    if attachment.size_bytes == 0 {
        return Err("file is empty".to_string());
    }
    if attachment.size_bytes > max_bytes {
        return Err(format!("file exceeds {} bytes", max_bytes));
    }
    match attachment.mime_kind() {
        Some(kind) if allowed.contains(&kind) => Ok(()),
        _ => {
            let names: Vec<&str> = allowed.iter().map(MimeKind::as_mime).collect();
            Err(format!("unsupported file type '{}' (expected {})", attachment.mime, names.join(", ")))
        }
    }
}
