//! reg-core: motor de wizards multi-step con validación y envío.
//!
//! Piezas, de las hojas a la raíz:
//! - `validate`: predicados puros y reglas por campo.
//! - `step`: steps con sus campos y validador.
//! - `wizard`: definición compartida y máquina de estados.
//! - `submission`: registro terminal, servicio externo y pipeline asíncrono.
//! - `event`: log append-only de transiciones y rechazos.
pub mod choice;
pub mod constants;
pub mod errors;
pub mod event;
pub mod form;
pub mod hashing;
pub mod step;
pub mod submission;
pub mod validate;
pub mod wizard;

pub use choice::{ChoiceOption, ChoiceSet};
pub use errors::WizardError;
pub use event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
pub use form::{Attachment, FieldValue, FormData, MimeKind};
pub use step::{FieldStep, StepDefinition, StepStatus};
pub use submission::{GatewayError, InMemoryRecordStore, RecordStore, RegistrationGateway, RegistrationRequest,
                     SubmissionPipeline, SubmissionRecord, SubmissionStatus, TicketIssuer, TimestampTicketIssuer};
pub use validate::{FieldIssue, FieldRule};
pub use wizard::{Wizard, WizardBuilder, WizardDefinition, WizardPhase, WizardState, WizardView};
