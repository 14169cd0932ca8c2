//! reg-domain: la inscripción a la conferencia expresada sobre `reg-core`.
pub mod conference;
pub mod error;
pub mod event_context;
pub mod fields;
pub mod locale;
pub mod navigation;
pub mod payment;
pub mod reference;

pub use conference::{conference_definition, ConferenceRegistration};
pub use error::DomainError;
pub use event_context::{BankAccount, EventContext};
pub use locale::{Locale, LocalizedText};
pub use navigation::{default_menu, MenuLink, MenuSection};
pub use payment::{payment_choices, PaymentInstruction, PaymentMethod};
pub use reference::{Agreement, Course, Identified};
