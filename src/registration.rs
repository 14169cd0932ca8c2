//! Ensamblado de la aplicación: configuración → contexto del evento,
//! definición del wizard y pipeline de envío.
use log::info;
use std::sync::Arc;

use crate::config::{AppConfig, ConfigError};
use reg_adapters::SimulatedGateway;
use reg_core::{EventStore, RecordStore, SubmissionPipeline, SubmissionRecord, TimestampTicketIssuer, Wizard,
               WizardDefinition, WizardError};
use reg_domain::{conference_definition, EventContext, Locale};

pub type RegistrationPipeline<S> = SubmissionPipeline<SimulatedGateway, S, TimestampTicketIssuer>;

pub struct RegistrationApp<S: RecordStore> {
    context: EventContext,
    definition: Arc<WizardDefinition>,
    pipeline: RegistrationPipeline<S>,
}

impl<S: RecordStore> RegistrationApp<S> {
    pub fn new(config: &AppConfig, locale: Locale, store: S) -> Result<Self, ConfigError> {
        let context = config.event_context()?;
        let definition = conference_definition(locale)?;
        // Las plazas ya confirmadas en ejecuciones anteriores cuentan contra la capacidad.
        let registered = store.list()
                              .map_err(ConfigError::Storage)?
                              .iter()
                              .filter(|record| record.is_completed())
                              .count();
        let seats_left = context.seats_left(registered);
        let gateway = SimulatedGateway::new(config.gateway_latency).with_capacity(seats_left as usize);
        let pipeline = SubmissionPipeline::new(gateway, store, context.ticket_issuer()).with_timeout(config.submit_timeout);
        info!("registration for {} ready ({} of {} seats left, {})",
              context.code,
              seats_left,
              context.capacity,
              context.price_label());
        Ok(Self { context,
                  definition,
                  pipeline })
    }

    pub fn context(&self) -> &EventContext {
        &self.context
    }

    pub fn definition(&self) -> Arc<WizardDefinition> {
        Arc::clone(&self.definition)
    }

    pub fn pipeline(&self) -> &RegistrationPipeline<S> {
        &self.pipeline
    }

    pub fn gateway(&self) -> &SimulatedGateway {
        self.pipeline.gateway()
    }

    pub fn store(&self) -> &S {
        self.pipeline.store()
    }

    pub fn start(&self) -> Wizard {
        Wizard::new(self.definition())
    }

    pub fn start_with<E: EventStore>(&self, events: E) -> Wizard<E> {
        Wizard::with_store(self.definition(), events)
    }

    pub async fn submit<E: EventStore>(&mut self, wizard: &mut Wizard<E>) -> Result<SubmissionRecord, WizardError> {
        self.pipeline.submit(wizard).await
    }
}
