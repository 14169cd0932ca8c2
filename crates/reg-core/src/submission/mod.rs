//! Envío del wizard: registro, servicio externo, tickets, store y pipeline.

mod gateway;
mod pipeline;
mod record;
mod store;
mod ticket;

pub use gateway::{GatewayError, RegistrationGateway, RegistrationRequest};
pub use pipeline::SubmissionPipeline;
pub use record::{SubmissionRecord, SubmissionStatus};
pub use store::{InMemoryRecordStore, RecordStore};
pub use ticket::{TicketIssuer, TimestampTicketIssuer};
