//! Reglas declarativas por campo.
use serde::{Deserialize, Serialize};

use super::predicates::{check_attachment, is_email, is_non_empty, is_phone};
use crate::constants::{MAX_RECEIPT_BYTES, MIN_PHONE_DIGITS};
use crate::form::{FieldValue, MimeKind};

/// Problema detectado en un campo: par campo/mensaje para la capa de presentación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(),
               message: message.into() }
    }
}

/// Regla que un campo debe cumplir para que su step sea válido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Texto no vacío.
    Required,
    Email,
    Phone,
    /// Una opción elegida (la validez de la opción la controla el `ChoiceSet`).
    Choice,
    Attachment { max_bytes: u64, allowed: Vec<MimeKind> },
}

impl FieldRule {
    /// Comprobante estándar: 10 MiB, jpeg/png/pdf.
    pub fn receipt() -> Self {
        FieldRule::Attachment { max_bytes: MAX_RECEIPT_BYTES,
                                allowed: MimeKind::ALL.to_vec() }
    }

    /// Evalúa la regla. `None` significa que el campo es aceptable.
    pub fn check(&self, field: &str, value: Option<&FieldValue>) -> Option<FieldIssue> {
        let problem = match (self, value) {
            (_, None) => Some("is required".to_string()),
            (FieldRule::Required, Some(FieldValue::Text(s))) => (!is_non_empty(s)).then(|| "is required".to_string()),
            (FieldRule::Email, Some(FieldValue::Text(s))) => {
                (!is_email(s)).then(|| "must look like name@domain.tld".to_string())
            }
            (FieldRule::Phone, Some(FieldValue::Text(s))) => {
                (!is_phone(s)).then(|| format!("must contain at least {} digits", MIN_PHONE_DIGITS))
            }
            (FieldRule::Choice, Some(FieldValue::Choice(k))) => (!is_non_empty(k)).then(|| "select an option".to_string()),
            (FieldRule::Attachment { max_bytes, allowed }, Some(FieldValue::File(a))) => {
                check_attachment(a, *max_bytes, allowed).err()
            }
            (rule, Some(_)) => Some(format!("has the wrong kind of value for {}", rule.label())),
        };
        problem.map(|message| FieldIssue::new(field, message))
    }

    fn label(&self) -> &'static str {
        match self {
            FieldRule::Required | FieldRule::Email | FieldRule::Phone => "a text field",
            FieldRule::Choice => "a choice",
            FieldRule::Attachment { .. } => "a file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Attachment;

    #[test]
    fn missing_value_is_always_an_issue() {
        for rule in [FieldRule::Required, FieldRule::Email, FieldRule::Phone, FieldRule::Choice, FieldRule::receipt()] {
            let issue = rule.check("x", None).expect("missing value must fail");
            assert_eq!(issue.field, "x");
        }
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let issue = FieldRule::receipt().check("receipt", Some(&FieldValue::text("r.pdf"))).unwrap();
        assert!(issue.message.contains("file"));
    }

    #[test]
    fn accepted_values() {
        assert!(FieldRule::Required.check("n", Some(&"Bob".into())).is_none());
        assert!(FieldRule::Email.check("e", Some(&"bob@example.com".into())).is_none());
        assert!(FieldRule::Phone.check("p", Some(&"01234567890".into())).is_none());
        assert!(FieldRule::Choice.check("c", Some(&FieldValue::choice("bank"))).is_none());
        let pdf = Attachment::new("r.pdf", "application/pdf", 2048);
        assert!(FieldRule::receipt().check("r", Some(&pdf.into())).is_none());
    }
}
