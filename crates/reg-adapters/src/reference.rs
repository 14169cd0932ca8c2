//! Conjuntos de referencia inyectados (convenios, cursos).
//!
//! Las páginas reciben un `ReferenceProvider` en lugar de arrays fijos, de
//! modo que el origen puede cambiar sin tocar la presentación.
use serde::de::DeserializeOwned;

use crate::AdapterError;
use reg_domain::Identified;

pub trait ReferenceProvider<T: Identified>: Send + Sync {
    fn all(&self) -> &[T];

    fn find(&self, id: &str) -> Option<&T> {
        self.all().iter().find(|item| item.id() == id)
    }

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// Conjunto fijo en memoria.
#[derive(Debug, Clone, Default)]
pub struct StaticReference<T> {
    items: Vec<T>,
}

impl<T: Identified> StaticReference<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Identified + DeserializeOwned> StaticReference<T> {
    pub fn from_json(raw: &str) -> Result<Self, AdapterError> {
        let items = serde_json::from_str(raw).map_err(|e| AdapterError::Parse(e.to_string()))?;
        Ok(Self { items })
    }
}

impl<T: Identified + Send + Sync> ReferenceProvider<T> for StaticReference<T> {
    fn all(&self) -> &[T] {
        &self.items
    }
}
