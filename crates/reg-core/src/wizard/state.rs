use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::WizardError;
use crate::form::FormData;
use crate::step::StepStatus;
use crate::validate::FieldIssue;

/// Fase del wizard respecto al envío.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// Edición normal: transiciones y cambios de campo permitidos.
    Editing,
    /// Envío en curso: se rechaza cualquier operación que modifique estado.
    Submitting,
    /// Terminal: el registro fue aceptado.
    Submitted,
}

/// Estado mutable de una instancia de wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    /// Step actual, 1-based. Siempre es un índice válido de la definición.
    pub current_step: usize,
    pub form: FormData,
    pub phase: WizardPhase,
}

impl Default for WizardState {
    fn default() -> Self {
        Self { current_step: 1,
               form: FormData::new(),
               phase: WizardPhase::Editing }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepView {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub status: StepStatus,
}

/// Vista serializable para la capa de presentación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardView {
    pub wizard_id: Uuid,
    pub current_step: usize,
    pub step_count: usize,
    pub phase: WizardPhase,
    pub steps: Vec<StepView>,
    /// Issues del último rechazo por validación.
    pub issues: Vec<FieldIssue>,
    pub last_rejection: Option<WizardError>,
}
