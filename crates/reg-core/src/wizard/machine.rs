//! Máquina de estados del wizard.
//!
//! Estados `Step(1..=N)` más la fase de envío. Reglas:
//! - `next()` sólo avanza si el step actual valida contra el formulario
//!   actual; la validez nunca se cachea.
//! - `previous()` retrocede sin validar; rechazado en el step 1.
//! - `set_field()` cambia únicamente el campo indicado y nunca mueve el cursor.
//! - `jump_to(n)` hacia adelante exige que todos los steps `< n` validen.
//! - Durante `Submitting` y tras `Submitted` toda operación de escritura se
//!   rechaza.
//!
//! Cada rechazo devuelve `Err`, queda en `last_rejection()` y se registra
//! como `TransitionRejected`; el formulario no se toca.
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::{StepView, WizardBuilder, WizardDefinition, WizardPhase, WizardState, WizardView};
use crate::errors::WizardError;
use crate::event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
use crate::form::{Attachment, FieldValue, FormData};
use crate::step::StepStatus;
use crate::submission::SubmissionRecord;
use crate::validate::FieldIssue;

#[derive(Debug)]
pub struct Wizard<E: EventStore = InMemoryEventStore> {
    id: Uuid,
    definition: Arc<WizardDefinition>,
    state: WizardState,
    furthest_step: usize,
    record: Option<SubmissionRecord>,
    last_rejection: Option<WizardError>,
    events: E,
}

impl Wizard<InMemoryEventStore> {
    /// Crea un wizard con store de eventos en memoria.
    pub fn new(definition: Arc<WizardDefinition>) -> Self {
        Self::with_store(definition, InMemoryEventStore::default())
    }

    #[inline]
    pub fn builder() -> WizardBuilder {
        WizardBuilder::new()
    }
}

impl<E: EventStore> Wizard<E> {
    pub fn with_store(definition: Arc<WizardDefinition>, mut events: E) -> Self {
        let id = Uuid::new_v4();
        events.append_kind(id,
                           WizardEventKind::Initialized { definition_hash: definition.definition_hash().to_string(),
                                                          step_count: definition.len() });
        Self { id,
               definition,
               state: WizardState::default(),
               furthest_step: 1,
               record: None,
               last_rejection: None,
               events }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn step_count(&self) -> usize {
        self.definition.len()
    }

    pub fn is_final_step(&self) -> bool {
        self.state.current_step == self.definition.len()
    }

    pub fn phase(&self) -> WizardPhase {
        self.state.phase
    }

    pub fn form(&self) -> &FormData {
        &self.state.form
    }

    /// Opción actualmente elegida para un campo de selección.
    pub fn selected_option(&self, field: &str) -> Option<&str> {
        self.state.form.choice(field)
    }

    pub fn attachment(&self, field: &str) -> Option<&Attachment> {
        self.state.form.attachment(field)
    }

    /// Motivo del último rechazo; se limpia con la siguiente operación aceptada.
    pub fn last_rejection(&self) -> Option<&WizardError> {
        self.last_rejection.as_ref()
    }

    /// Registro de envío asociado (pendiente, fallido o completado).
    pub fn record(&self) -> Option<&SubmissionRecord> {
        self.record.as_ref()
    }

    pub fn event_store(&self) -> &E {
        &self.events
    }

    pub fn events(&self) -> Vec<WizardEvent> {
        self.events.list(self.id)
    }

    /// Secuencia compacta de eventos (ver `WizardEventKind::code`).
    pub fn event_codes(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.kind.code()).collect()
    }

    // ------------------------------------------------------------------
    // Campos
    // ------------------------------------------------------------------

    /// Asigna el valor de un campo. Los valores `Choice` de campos con
    /// `ChoiceSet` pasan por la misma comprobación que `select_option`.
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), WizardError> {
        self.write_field("set_field", field, value.into())
    }

    /// Elige una opción; las opciones deshabilitadas o desconocidas se
    /// rechazan sin cambiar la selección vigente.
    pub fn select_option(&mut self, field: &str, key: &str) -> Result<(), WizardError> {
        self.write_field("select_option", field, FieldValue::choice(key))
    }

    /// Elimina el valor de un campo (p. ej. quitar un adjunto). Devuelve
    /// `true` si había valor.
    pub fn clear_field(&mut self, field: &str) -> Result<bool, WizardError> {
        if let Err(e) = self.ensure_editing().and_then(|_| self.ensure_known_field(field)) {
            return Err(self.reject("clear_field", e));
        }
        let removed = self.state.form.remove(field).is_some();
        if removed {
            self.accept(WizardEventKind::FieldCleared { field: field.to_string() });
        } else {
            self.last_rejection = None;
        }
        Ok(removed)
    }

    fn write_field(&mut self, action: &str, field: &str, value: FieldValue) -> Result<(), WizardError> {
        if let Err(e) = self.check_write(field, &value) {
            return Err(self.reject(action, e));
        }
        let kind = match &value {
            FieldValue::Choice(key) => WizardEventKind::OptionSelected { field: field.to_string(),
                                                                         option: key.clone() },
            _ => WizardEventKind::FieldUpdated { field: field.to_string() },
        };
        self.state.form.set(field, value);
        self.accept(kind);
        Ok(())
    }

    fn check_write(&self, field: &str, value: &FieldValue) -> Result<(), WizardError> {
        self.ensure_editing()?;
        self.ensure_known_field(field)?;
        if let Some(set) = self.definition.choice_for(field) {
            match value {
                FieldValue::Choice(key) => {
                    set.ensure_selectable(key)?;
                }
                other => {
                    return Err(WizardError::UnknownOption { field: field.to_string(),
                                                            option: other.as_text().unwrap_or_default().to_string() })
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Validación
    // ------------------------------------------------------------------

    /// Issues del step `index` contra el formulario actual.
    pub fn validate_step(&self, index: usize) -> Result<Vec<FieldIssue>, WizardError> {
        let step = self.definition.step(index).ok_or(WizardError::InvalidStepIndex(index))?;
        Ok(step.validate(&self.state.form))
    }

    pub fn current_issues(&self) -> Vec<FieldIssue> {
        self.validate_step(self.state.current_step).unwrap_or_default()
    }

    /// Issues de un único campo, para feedback inmediato al editar.
    pub fn issues_for(&self, field: &str) -> Vec<FieldIssue> {
        self.definition
            .owner_of(field)
            .map(|idx| {
                self.validate_step(idx)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|i| i.field == field)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Valida los steps `1..=upto`; devuelve el primer fallo.
    fn validate_through(&self, upto: usize) -> Result<(), WizardError> {
        for step in self.definition.steps().take_while(|s| s.index() <= upto) {
            let issues = step.validate(&self.state.form);
            if !issues.is_empty() {
                return Err(WizardError::Validation { step: step.index(),
                                                     issues });
            }
        }
        Ok(())
    }

    /// Valida todos los steps de la definición.
    pub fn validate_all(&self) -> Result<(), WizardError> {
        self.validate_through(self.definition.len())
    }

    // ------------------------------------------------------------------
    // Transiciones
    // ------------------------------------------------------------------

    /// Avanza al siguiente step si el actual es válido. Devuelve el nuevo índice.
    pub fn next(&mut self) -> Result<usize, WizardError> {
        let from = self.state.current_step;
        if let Err(e) = self.check_next(from) {
            return Err(self.reject("next", e));
        }
        let to = from + 1;
        self.move_to(to);
        self.accept(WizardEventKind::Advanced { from, to });
        Ok(to)
    }

    fn check_next(&self, from: usize) -> Result<(), WizardError> {
        self.ensure_editing()?;
        if from >= self.definition.len() {
            return Err(WizardError::AtFinalStep);
        }
        let issues = self.validate_step(from)?;
        if !issues.is_empty() {
            return Err(WizardError::Validation { step: from, issues });
        }
        Ok(())
    }

    /// Retrocede un step sin validar.
    pub fn previous(&mut self) -> Result<usize, WizardError> {
        let from = self.state.current_step;
        let check = self.ensure_editing().and_then(|_| {
                                             if from <= 1 {
                                                 Err(WizardError::AtFirstStep)
                                             } else {
                                                 Ok(())
                                             }
                                         });
        if let Err(e) = check {
            return Err(self.reject("previous", e));
        }
        let to = from - 1;
        self.move_to(to);
        self.accept(WizardEventKind::Returned { from, to });
        Ok(to)
    }

    /// Salta a un step arbitrario. Hacia atrás siempre se permite; hacia
    /// adelante se revalidan todos los steps anteriores al destino.
    pub fn jump_to(&mut self, target: usize) -> Result<usize, WizardError> {
        let from = self.state.current_step;
        let check = self.ensure_editing().and_then(|_| {
                                             if target == 0 || target > self.definition.len() {
                                                 return Err(WizardError::InvalidStepIndex(target));
                                             }
                                             if target > from {
                                                 self.validate_through(target - 1)?;
                                             }
                                             Ok(())
                                         });
        if let Err(e) = check {
            return Err(self.reject("jump_to", e));
        }
        if target != from {
            self.move_to(target);
            self.accept(WizardEventKind::Jumped { from, to: target });
        }
        Ok(target)
    }

    fn move_to(&mut self, to: usize) {
        debug!("wizard {} step {} -> {}", self.id, self.state.current_step, to);
        self.state.current_step = to;
        self.furthest_step = self.furthest_step.max(to);
    }

    // ------------------------------------------------------------------
    // Vista
    // ------------------------------------------------------------------

    pub fn view(&self) -> WizardView {
        let steps = self.definition
                        .steps()
                        .map(|s| {
                            let status = if s.index() == self.state.current_step {
                                StepStatus::Active
                            } else if s.index() <= self.furthest_step {
                                StepStatus::Visited
                            } else {
                                StepStatus::Pending
                            };
                            StepView { index: s.index(),
                                       id: s.id().to_string(),
                                       title: s.title().to_string(),
                                       status }
                        })
                        .collect();
        WizardView { wizard_id: self.id,
                     current_step: self.state.current_step,
                     step_count: self.definition.len(),
                     phase: self.state.phase,
                     steps,
                     issues: self.last_rejection.as_ref().map(|e| e.issues().to_vec()).unwrap_or_default(),
                     last_rejection: self.last_rejection.clone() }
    }

    // ------------------------------------------------------------------
    // Soporte para el pipeline de envío
    // ------------------------------------------------------------------

    pub(crate) fn ensure_editing(&self) -> Result<(), WizardError> {
        match self.state.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitting => Err(WizardError::SubmissionInFlight),
            WizardPhase::Submitted => Err(WizardError::AlreadySubmitted),
        }
    }

    fn ensure_known_field(&self, field: &str) -> Result<(), WizardError> {
        match self.definition.owner_of(field) {
            Some(_) => Ok(()),
            None => Err(WizardError::UnknownField(field.to_string())),
        }
    }

    pub(crate) fn reject(&mut self, action: &str, error: WizardError) -> WizardError {
        debug!("wizard {} rejected {}: {}", self.id, action, error);
        self.events.append_kind(self.id,
                                WizardEventKind::TransitionRejected { action: action.to_string(),
                                                                      error: error.clone() });
        self.last_rejection = Some(error.clone());
        error
    }

    fn accept(&mut self, kind: WizardEventKind) {
        self.last_rejection = None;
        self.events.append_kind(self.id, kind);
    }

    /// Registro a reutilizar en un reintento (sólo si el anterior falló).
    pub(crate) fn retry_record(&self) -> Option<SubmissionRecord> {
        self.record.clone()
    }

    pub(crate) fn mark_submitting(&mut self, record: SubmissionRecord) {
        self.last_rejection = None;
        self.events.append_kind(self.id,
                                WizardEventKind::SubmissionStarted { record_id: record.id,
                                                                     attempt: record.attempts,
                                                                     fingerprint: record.fields.fingerprint() });
        self.state.phase = WizardPhase::Submitting;
        self.record = Some(record);
    }

    /// Estado terminal: el formulario (y el adjunto) se liberan; el registro
    /// conserva la copia enviada.
    pub(crate) fn mark_submitted(&mut self, record: SubmissionRecord) {
        let ticket = record.ticket.clone().unwrap_or_default();
        self.events.append_kind(self.id,
                                WizardEventKind::SubmissionCompleted { record_id: record.id,
                                                                       ticket });
        self.state.phase = WizardPhase::Submitted;
        self.state.form.clear();
        self.record = Some(record);
    }

    /// Vuelve a edición conservando el formulario intacto.
    pub(crate) fn mark_failed(&mut self, record: SubmissionRecord, error: WizardError) {
        self.events.append_kind(self.id,
                                WizardEventKind::SubmissionFailed { record_id: record.id,
                                                                    error: error.clone() });
        self.state.phase = WizardPhase::Editing;
        self.last_rejection = Some(error);
        self.record = Some(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ChoiceOption, ChoiceSet};
    use crate::step::FieldStep;
    use crate::validate::FieldRule;

    fn definition() -> Arc<WizardDefinition> {
        Wizard::builder().step(FieldStep::new(1, "personal_info", "Personal information").field("full_name", FieldRule::Required)
                                                                                      .field("email", FieldRule::Email)
                                                                                      .field("phone", FieldRule::Phone))
                         .step(FieldStep::new(2, "payment_method", "Payment").field("payment_method", FieldRule::Choice))
                         .step(FieldStep::new(3, "receipt_upload", "Receipt").field("receipt", FieldRule::receipt()))
                         .choices(ChoiceSet::new("payment_method",
                                                 vec![ChoiceOption::enabled("bank", "Bank transfer"),
                                                      ChoiceOption::enabled("cash", "Cash"),
                                                      ChoiceOption::disabled("online", "Online payment")]))
                         .build()
                         .expect("valid definition")
    }

    fn fill_personal(w: &mut Wizard) {
        w.set_field("full_name", "Bob").unwrap();
        w.set_field("email", "bob@example.com").unwrap();
        w.set_field("phone", "01234567890").unwrap();
    }

    #[test]
    fn starts_at_step_one_with_initialized_event() {
        let w = Wizard::new(definition());
        assert_eq!(w.current_step(), 1);
        assert_eq!(w.phase(), WizardPhase::Editing);
        assert_eq!(w.event_codes(), vec!["I"]);
    }

    #[test]
    fn next_is_gated_by_validation_and_keeps_form() {
        let mut w = Wizard::new(definition());
        w.set_field("email", "bob@example.com").unwrap();
        let before = w.form().clone();

        let err = w.next().unwrap_err();
        assert!(matches!(&err, WizardError::Validation { step: 1, .. }));
        assert!(err.issues().iter().any(|i| i.field == "full_name"));
        assert_eq!(w.current_step(), 1);
        assert_eq!(w.form(), &before);
        assert_eq!(w.last_rejection(), Some(&err));
        assert_eq!(w.view().issues, err.issues().to_vec());

        fill_personal(&mut w);
        assert_eq!(w.next(), Ok(2));
        assert!(w.last_rejection().is_none());
    }

    #[test]
    fn previous_needs_no_validation() {
        let mut w = Wizard::new(definition());
        assert_eq!(w.previous(), Err(WizardError::AtFirstStep));
        fill_personal(&mut w);
        w.next().unwrap();
        // invalidar un campo del step 1 no impide volver atrás
        w.set_field("email", "broken").unwrap();
        assert_eq!(w.previous(), Ok(1));
    }

    #[test]
    fn set_field_touches_only_its_field() {
        let mut w = Wizard::new(definition());
        fill_personal(&mut w);
        let mut expected = w.form().clone();
        w.set_field("phone", "+20 100 000 0000").unwrap();
        expected.set("phone", "+20 100 000 0000".into());
        assert_eq!(w.form(), &expected);
        assert_eq!(w.current_step(), 1);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut w = Wizard::new(definition());
        assert_eq!(w.set_field("nickname", "bobby"), Err(WizardError::UnknownField("nickname".into())));
        assert!(w.form().is_empty());
    }

    #[test]
    fn disabled_option_never_becomes_selected() {
        let mut w = Wizard::new(definition());
        assert!(matches!(w.select_option("payment_method", "online"), Err(WizardError::DisabledOption { .. })));
        assert_eq!(w.selected_option("payment_method"), None);

        w.select_option("payment_method", "bank").unwrap();
        assert!(w.select_option("payment_method", "online").is_err());
        assert!(w.set_field("payment_method", FieldValue::choice("online")).is_err());
        assert!(w.set_field("payment_method", "online").is_err());
        assert_eq!(w.selected_option("payment_method"), Some("bank"));

        w.select_option("payment_method", "cash").unwrap();
        assert_eq!(w.selected_option("payment_method"), Some("cash"));
    }

    #[test]
    fn final_step_does_not_advance() {
        let mut w = Wizard::new(definition());
        fill_personal(&mut w);
        w.next().unwrap();
        w.select_option("payment_method", "bank").unwrap();
        assert_eq!(w.next(), Ok(3));
        w.set_field("receipt", Attachment::new("r.pdf", "application/pdf", 1000)).unwrap();
        assert_eq!(w.next(), Err(WizardError::AtFinalStep));
        assert_eq!(w.current_step(), 3);
    }

    #[test]
    fn forward_jump_revalidates_skipped_steps() {
        let mut w = Wizard::new(definition());
        assert!(matches!(w.jump_to(3), Err(WizardError::Validation { step: 1, .. })));
        fill_personal(&mut w);
        assert!(matches!(w.jump_to(3), Err(WizardError::Validation { step: 2, .. })));
        w.select_option("payment_method", "bank").unwrap();
        assert_eq!(w.jump_to(3), Ok(3));
        assert_eq!(w.jump_to(1), Ok(1));
        assert_eq!(w.jump_to(4), Err(WizardError::InvalidStepIndex(4)));
        assert_eq!(w.jump_to(0), Err(WizardError::InvalidStepIndex(0)));
    }

    #[test]
    fn later_steps_keep_state_when_earlier_step_changes() {
        let mut w = Wizard::new(definition());
        fill_personal(&mut w);
        w.next().unwrap();
        w.select_option("payment_method", "bank").unwrap();
        w.next().unwrap();
        w.previous().unwrap();
        w.previous().unwrap();
        w.set_field("full_name", "Robert").unwrap();
        assert_eq!(w.selected_option("payment_method"), Some("bank"));
        assert_eq!(w.next(), Ok(2));
        assert_eq!(w.next(), Ok(3));
    }

    #[test]
    fn clear_field_releases_attachment() {
        let mut w = Wizard::new(definition());
        w.set_field("receipt", Attachment::new("r.png", "image/png", 10)).unwrap();
        assert!(w.attachment("receipt").is_some());
        assert_eq!(w.clear_field("receipt"), Ok(true));
        assert!(w.attachment("receipt").is_none());
        assert_eq!(w.clear_field("receipt"), Ok(false));
    }

    #[test]
    fn view_reports_progress() {
        let mut w = Wizard::new(definition());
        fill_personal(&mut w);
        w.next().unwrap();
        w.select_option("payment_method", "bank").unwrap();
        w.next().unwrap();
        w.previous().unwrap();
        let statuses: Vec<StepStatus> = w.view().steps.iter().map(|s| s.status).collect();
        assert_eq!(statuses, vec![StepStatus::Visited, StepStatus::Active, StepStatus::Visited]);
    }

    #[test]
    fn every_rejection_is_logged_as_event() {
        let mut w = Wizard::new(definition());
        let _ = w.next();
        let _ = w.previous();
        let _ = w.select_option("payment_method", "online");
        let rejected = w.events()
                        .iter()
                        .filter(|e| matches!(e.kind, WizardEventKind::TransitionRejected { .. }))
                        .count();
        assert_eq!(rejected, 3);
    }

    #[test]
    fn edits_are_rejected_while_submitting() {
        let mut w = Wizard::new(definition());
        fill_personal(&mut w);
        w.next().unwrap();
        w.select_option("payment_method", "bank").unwrap();
        w.mark_submitting(SubmissionRecord::new(w.form().clone()));
        let form = w.form().clone();
        let rejected_before = w.events()
                               .iter()
                               .filter(|e| matches!(e.kind, WizardEventKind::TransitionRejected { .. }))
                               .count();

        assert_eq!(w.set_field("full_name", "Alice"), Err(WizardError::SubmissionInFlight));
        assert_eq!(w.select_option("payment_method", "cash"), Err(WizardError::SubmissionInFlight));
        assert_eq!(w.clear_field("email"), Err(WizardError::SubmissionInFlight));
        assert_eq!(w.next(), Err(WizardError::SubmissionInFlight));
        assert_eq!(w.previous(), Err(WizardError::SubmissionInFlight));
        assert_eq!(w.jump_to(1), Err(WizardError::SubmissionInFlight));

        assert_eq!(w.phase(), WizardPhase::Submitting);
        assert_eq!(w.current_step(), 2);
        assert_eq!(w.form(), &form);
        assert_eq!(w.last_rejection(), Some(&WizardError::SubmissionInFlight));
        let rejected_after = w.events()
                              .iter()
                              .filter(|e| matches!(e.kind, WizardEventKind::TransitionRejected { .. }))
                              .count();
        assert_eq!(rejected_after - rejected_before, 6);
    }
}
