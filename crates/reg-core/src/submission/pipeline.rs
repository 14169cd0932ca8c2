//! Pipeline de envío: acción terminal disparada desde el último step.
//!
//! Orden de operaciones:
//! 1. Precondiciones: step final, todos los steps válidos (se revalida todo
//!    aunque la UI ya lo haya hecho).
//! 2. Registro `Pending` (nuevo, o el mismo registro si el intento anterior
//!    falló) y persistencia.
//! 3. Llamada externa con timeout.
//! 4. Ticket, estado terminal y persistencia.
//!
//! Si el futuro de `submit` se descarta a mitad de la llamada (el usuario
//! navega fuera), `InFlight` marca el registro como fallido y devuelve el
//! wizard a edición: nunca queda un `Pending` sin resolución.
use log::{error, info, warn};
use std::time::Duration;

use super::{RecordStore, RegistrationGateway, RegistrationRequest, SubmissionRecord, SubmissionStatus, TicketIssuer};
use crate::constants::DEFAULT_SUBMIT_TIMEOUT_SECS;
use crate::errors::WizardError;
use crate::event::EventStore;
use crate::wizard::{Wizard, WizardPhase};

const CANCELLED: &str = "submission cancelled before completion";

pub struct SubmissionPipeline<G, S, T>
    where G: RegistrationGateway,
          S: RecordStore,
          T: TicketIssuer
{
    gateway: G,
    store: S,
    issuer: T,
    timeout: Duration,
}

impl<G, S, T> SubmissionPipeline<G, S, T>
    where G: RegistrationGateway,
          S: RecordStore,
          T: TicketIssuer
{
    pub fn new(gateway: G, store: S, issuer: T) -> Self {
        Self { gateway,
               store,
               issuer,
               timeout: Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS) }
    }

    /// Tiempo máximo de espera de la llamada externa; al vencer el registro pasa a `Failed`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn issuer(&self) -> &T {
        &self.issuer
    }

    /// Envía el wizard. Llamarlo de nuevo tras un éxito devuelve el mismo
    /// registro; tras un fallo reintenta sobre el mismo registro.
    pub async fn submit<E: EventStore>(&mut self, wizard: &mut Wizard<E>) -> Result<SubmissionRecord, WizardError> {
        match wizard.phase() {
            WizardPhase::Submitted => {
                if let Some(record) = wizard.record() {
                    return Ok(record.clone());
                }
            }
            WizardPhase::Submitting => return Err(wizard.reject("submit", WizardError::SubmissionInFlight)),
            WizardPhase::Editing => {}
        }
        if !wizard.is_final_step() {
            return Err(wizard.reject("submit", WizardError::NotAtFinalStep));
        }
        if let Err(e) = wizard.validate_all() {
            return Err(wizard.reject("submit", e));
        }

        let mut record = match wizard.retry_record() {
            Some(previous) if previous.status == SubmissionStatus::Failed => previous,
            _ => SubmissionRecord::new(wizard.form().clone()),
        };
        record.begin_attempt(wizard.form());
        if let Err(e) = self.store.save(&record) {
            return Err(wizard.reject("submit", e));
        }
        info!("submission {} attempt {} started (wizard {})", record.id, record.attempts, wizard.id());
        wizard.mark_submitting(record.clone());

        let request = RegistrationRequest { record_id: record.id,
                                            attempt: record.attempts,
                                            fields: record.fields.clone() };
        let mut in_flight = InFlight { wizard,
                                       store: &mut self.store,
                                       record: Some(record) };
        let outcome = tokio::time::timeout(self.timeout, self.gateway.register(&request)).await;
        match outcome {
            Ok(Ok(())) => in_flight.complete(self.issuer.issue()),
            Ok(Err(e)) => in_flight.fail(WizardError::Submission(e.to_string())),
            Err(_) => in_flight.fail(WizardError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

/// Envío en curso. Resuelve el registro exactamente una vez: por
/// `complete`, por `fail` o, si se descarta, en `Drop`.
struct InFlight<'a, E: EventStore, S: RecordStore> {
    wizard: &'a mut Wizard<E>,
    store: &'a mut S,
    record: Option<SubmissionRecord>,
}

impl<E: EventStore, S: RecordStore> InFlight<'_, E, S> {
    fn complete(&mut self, ticket: String) -> Result<SubmissionRecord, WizardError> {
        let Some(mut record) = self.record.take() else {
            return Err(WizardError::SubmissionInFlight);
        };
        record.complete(ticket);
        info!("submission {} completed with ticket {}", record.id, record.ticket().unwrap_or_default());
        let saved = self.store.save(&record);
        // El servicio externo ya aceptó el registro: el wizard pasa a terminal
        // aunque falle la persistencia local, para no duplicar en un reintento.
        self.wizard.mark_submitted(record.clone());
        match saved {
            Ok(()) => Ok(record),
            Err(e) => {
                error!("submission {} completed but could not be stored: {}", record.id, e);
                Err(e)
            }
        }
    }

    fn fail(&mut self, error: WizardError) -> Result<SubmissionRecord, WizardError> {
        let Some(record) = self.record.take() else {
            return Err(error);
        };
        self.resolve_failed(record, error.clone());
        Err(error)
    }

    fn resolve_failed(&mut self, mut record: SubmissionRecord, error: WizardError) {
        warn!("submission {} attempt {} failed: {}", record.id, record.attempts, error);
        record.fail(error.to_string());
        if let Err(e) = self.store.save(&record) {
            error!("could not store failed submission {}: {}", record.id, e);
        }
        self.wizard.mark_failed(record, error);
    }
}

impl<E: EventStore, S: RecordStore> Drop for InFlight<'_, E, S> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.resolve_failed(record, WizardError::Submission(CANCELLED.to_string()));
        }
    }
}
