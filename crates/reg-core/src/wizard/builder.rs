//! Builder para `WizardDefinition`.
//!
//! ```ignore
//! let definition = WizardBuilder::new()
//!     .step(FieldStep::new(1, "personal_info", "Personal").field("email", FieldRule::Email))
//!     .step(FieldStep::new(2, "payment", "Payment").field("payment_method", FieldRule::Choice))
//!     .choices(payment_choices)
//!     .build()?;
//! let wizard = Wizard::new(definition);
//! ```
use std::sync::Arc;

use crate::choice::ChoiceSet;
use crate::errors::WizardError;
use crate::step::StepDefinition;

use super::WizardDefinition;

#[derive(Default)]
pub struct WizardBuilder {
    steps: Vec<Box<dyn StepDefinition>>,
    choices: Vec<ChoiceSet>,
}

impl WizardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn step<S>(mut self, step: S) -> Self
        where S: StepDefinition + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    #[inline]
    pub fn choices(mut self, set: ChoiceSet) -> Self {
        self.choices.push(set);
        self
    }

    /// Valida la configuración y devuelve la definición compartible.
    pub fn build(self) -> Result<Arc<WizardDefinition>, WizardError> {
        WizardDefinition::new(self.steps, self.choices).map(Arc::new)
    }
}
