//! Conjuntos de opciones para campos de selección.
//!
//! Una opción deshabilitada se muestra pero nunca puede quedar seleccionada;
//! el wizard rechaza el intento con `WizardError::DisabledOption`.
use serde::{Deserialize, Serialize};

use crate::errors::WizardError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
    pub disabled: bool,
}

impl ChoiceOption {
    pub fn enabled(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: key.into(),
               label: label.into(),
               disabled: false }
    }

    pub fn disabled(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { disabled: true,
               ..Self::enabled(key, label) }
    }
}

/// Opciones disponibles para un campo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub field: String,
    pub options: Vec<ChoiceOption>,
}

impl ChoiceSet {
    pub fn new(field: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self { field: field.into(),
               options }
    }

    pub fn option(&self, key: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.key == key)
    }

    pub fn selectable(&self) -> impl Iterator<Item = &ChoiceOption> {
        self.options.iter().filter(|o| !o.disabled)
    }

    /// Comprueba que `key` exista y esté habilitada.
    pub fn ensure_selectable(&self, key: &str) -> Result<&ChoiceOption, WizardError> {
        match self.option(key) {
            None => Err(WizardError::UnknownOption { field: self.field.clone(),
                                                     option: key.to_string() }),
            Some(o) if o.disabled => Err(WizardError::DisabledOption { field: self.field.clone(),
                                                                       option: key.to_string() }),
            Some(o) => Ok(o),
        }
    }
}
