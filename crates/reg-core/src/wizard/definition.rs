//! Definición inmutable de un wizard.
//!
//! Se construye una sola vez (normalmente con `WizardBuilder`) y se comparte
//! entre instancias de `Wizard` mediante `Arc`. Los errores de forma
//! (índices no contiguos, steps sin campos, campos duplicados) se detectan
//! aquí, al construir, y nunca durante el envío.
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::choice::ChoiceSet;
use crate::constants::ENGINE_VERSION;
use crate::errors::WizardError;
use crate::hashing::hash_value;
use crate::step::StepDefinition;

pub struct WizardDefinition {
    steps: Vec<Box<dyn StepDefinition>>,
    choices: Vec<ChoiceSet>,
    owners: HashMap<String, usize>,
    definition_hash: String,
}

impl WizardDefinition {
    pub fn new(mut steps: Vec<Box<dyn StepDefinition>>, choices: Vec<ChoiceSet>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::Configuration("a wizard needs at least one step".into()));
        }
        steps.sort_by_key(|s| s.index());
        let mut ids = HashSet::new();
        let mut owners: HashMap<String, usize> = HashMap::new();
        for (pos, step) in steps.iter().enumerate() {
            if step.index() != pos + 1 {
                return Err(WizardError::Configuration(format!("step indices must be contiguous from 1; found {} at position {}",
                                                              step.index(),
                                                              pos + 1)));
            }
            if !ids.insert(step.id().to_string()) {
                return Err(WizardError::Configuration(format!("duplicate step id '{}'", step.id())));
            }
            let fields = step.fields();
            if fields.is_empty() {
                return Err(WizardError::Configuration(format!("step '{}' declares no fields to validate", step.id())));
            }
            for field in fields {
                if let Some(other) = owners.insert(field.to_string(), step.index()) {
                    return Err(WizardError::Configuration(format!("field '{}' is owned by steps {} and {}",
                                                                  field,
                                                                  other,
                                                                  step.index())));
                }
            }
        }
        let mut choice_fields = HashSet::new();
        for set in &choices {
            if !owners.contains_key(&set.field) {
                return Err(WizardError::Configuration(format!("choice set for unknown field '{}'", set.field)));
            }
            if !choice_fields.insert(set.field.clone()) {
                return Err(WizardError::Configuration(format!("field '{}' has two choice sets", set.field)));
            }
            if set.selectable().next().is_none() {
                return Err(WizardError::Configuration(format!("choice set '{}' has no selectable option", set.field)));
            }
        }
        let definition_hash = Self::compute_hash(&steps);
        Ok(Self { steps,
                  choices,
                  owners,
                  definition_hash })
    }

    fn compute_hash(steps: &[Box<dyn StepDefinition>]) -> String {
        let shape: Vec<_> = steps.iter()
                                 .map(|s| json!({ "index": s.index(), "id": s.id(), "fields": s.fields() }))
                                 .collect();
        hash_value(&json!({ "engine_version": ENGINE_VERSION, "steps": shape }))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step por índice 1-based.
    pub fn step(&self, index: usize) -> Option<&dyn StepDefinition> {
        index.checked_sub(1).and_then(|i| self.steps.get(i)).map(|s| s.as_ref())
    }

    pub fn steps(&self) -> impl Iterator<Item = &dyn StepDefinition> {
        self.steps.iter().map(|s| s.as_ref())
    }

    pub fn choices(&self) -> &[ChoiceSet] {
        &self.choices
    }

    pub fn choice_for(&self, field: &str) -> Option<&ChoiceSet> {
        self.choices.iter().find(|c| c.field == field)
    }

    /// Índice del step que posee `field`.
    pub fn owner_of(&self, field: &str) -> Option<usize> {
        self.owners.get(field).copied()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

impl fmt::Debug for WizardDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.steps.iter().map(|s| s.id()).collect();
        f.debug_struct("WizardDefinition")
         .field("steps", &ids)
         .field("choices", &self.choices)
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}
