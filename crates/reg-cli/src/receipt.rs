//! Lectura del recibo a adjuntar desde disco.
use std::fs;
use std::path::Path;

use reg_core::{Attachment, MimeKind};

const UNKNOWN_MIME: &str = "application/octet-stream";

/// Describe el fichero como adjunto. El tipo se deduce de la extensión; la
/// validación (tamaño, tipo) la hace el wizard.
pub fn attachment_from_path(path: &Path) -> std::io::Result<Attachment> {
    let meta = fs::metadata(path)?;
    let file_name = path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
    let mime = MimeKind::from_file_name(&file_name).map(|k| k.as_mime())
                                                   .unwrap_or(UNKNOWN_MIME);
    Ok(Attachment::new(file_name, mime, meta.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Receipt.PDF");
        fs::write(&path, b"%PDF-1.7").unwrap();
        let att = attachment_from_path(&path).unwrap();
        assert_eq!(att.file_name, "Receipt.PDF");
        assert_eq!(att.mime, "application/pdf");
        assert_eq!(att.size_bytes, 8);

        let other = dir.path().join("notes.txt");
        fs::write(&other, b"x").unwrap();
        assert_eq!(attachment_from_path(&other).unwrap().mime, UNKNOWN_MIME);
        assert!(attachment_from_path(&dir.path().join("missing.pdf")).is_err());
    }
}
