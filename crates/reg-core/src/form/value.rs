//! Valores de campo capturados por el wizard.
//!
//! Un `FieldValue` puede ser texto libre, la clave de una opción elegida o
//! la referencia a un archivo adjunto. El wizard no guarda los bytes del
//! archivo: sólo su nombre, tipo MIME y tamaño, suficientes para validar y
//! para que la capa externa lo suba.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipos MIME aceptados para comprobantes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeKind {
    Jpeg,
    Png,
    Pdf,
}

impl MimeKind {
    pub const ALL: [MimeKind; 3] = [MimeKind::Jpeg, MimeKind::Png, MimeKind::Pdf];

    pub fn as_mime(&self) -> &'static str {
        match self {
            MimeKind::Jpeg => "image/jpeg",
            MimeKind::Png => "image/png",
            MimeKind::Pdf => "application/pdf",
        }
    }

    /// Interpreta un content-type (ignora parámetros y mayúsculas).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let base = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match base.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(MimeKind::Jpeg),
            "image/png" => Some(MimeKind::Png),
            "application/pdf" => Some(MimeKind::Pdf),
            _ => None,
        }
    }

    /// Deduce el tipo a partir de la extensión del nombre de archivo.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(MimeKind::Jpeg),
            "png" => Some(MimeKind::Png),
            "pdf" => Some(MimeKind::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for MimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// Referencia a un archivo adjunto por el usuario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, size_bytes: u64) -> Self {
        Self { file_name: file_name.into(),
               mime: mime.into(),
               size_bytes }
    }

    pub fn mime_kind(&self) -> Option<MimeKind> {
        MimeKind::from_mime(&self.mime)
    }
}

/// Valor tipado de un campo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Choice(String),
    File(Attachment),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choice(key: impl Into<String>) -> Self {
        FieldValue::Choice(key.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            FieldValue::Choice(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&Attachment> {
        match self {
            FieldValue::File(a) => Some(a),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Attachment> for FieldValue {
    fn from(value: Attachment) -> Self {
        FieldValue::File(value)
    }
}
