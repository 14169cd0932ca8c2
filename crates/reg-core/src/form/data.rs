//! `FormData`: mapa nombre de campo → valor, propiedad exclusiva del wizard.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Attachment, FieldValue};
use crate::hashing::hash_value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Texto del campo, si existe y es texto.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn choice(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_choice)
    }

    pub fn attachment(&self, field: &str) -> Option<&Attachment> {
        self.get(field).and_then(FieldValue::as_attachment)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Inserta o reemplaza un valor; devuelve el anterior.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fingerprint estable del contenido (claves ordenadas).
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_value(self).unwrap_or_default();
        hash_value(&json)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
