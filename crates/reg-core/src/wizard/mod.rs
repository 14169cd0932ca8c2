//! Wizard: definición compartida, estado y máquina de transiciones.

mod builder;
mod definition;
mod machine;
mod state;

pub use builder::WizardBuilder;
pub use definition::WizardDefinition;
pub use machine::Wizard;
pub use state::{StepView, WizardPhase, WizardState, WizardView};
