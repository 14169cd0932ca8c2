use serde::{Deserialize, Serialize};

use crate::{DomainError, LocalizedText};
use reg_core::TimestampTicketIssuer;

/// Datos de transferencia bancaria mostrados al elegir `PaymentMethod::BankTransfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: String,
    pub swift: String,
}

/// Evento/conferencia al que se inscribe el usuario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    pub code: String,
    pub title: LocalizedText,
    pub capacity: u32,
    pub price: u32,
    pub currency: String,
    #[serde(default)]
    pub bank: Option<BankAccount>,
}

impl EventContext {
    pub fn new(code: impl Into<String>,
               title: impl Into<LocalizedText>,
               capacity: u32,
               price: u32,
               currency: impl Into<String>)
               -> Result<Self, DomainError> {
        let ctx = Self { code: code.into(),
                         title: title.into(),
                         capacity,
                         price,
                         currency: currency.into(),
                         bank: None };
        ctx.validate()?;
        Ok(ctx)
    }

    pub fn with_bank(mut self, bank: BankAccount) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.code.is_empty() || !self.code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::ValidationError(format!("event code '{}' must be ASCII alphanumeric or '-'",
                                                            self.code)));
        }
        if self.capacity == 0 {
            return Err(DomainError::ValidationError("event capacity must be greater than zero".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(DomainError::ValidationError("currency must not be empty".into()));
        }
        Ok(())
    }

    /// Prefijo de los tickets emitidos para este evento.
    pub fn ticket_prefix(&self) -> String {
        self.code.to_ascii_uppercase()
    }

    pub fn ticket_issuer(&self) -> TimestampTicketIssuer {
        TimestampTicketIssuer::new(self.ticket_prefix())
    }

    pub fn seats_left(&self, registered: usize) -> u32 {
        self.capacity.saturating_sub(u32::try_from(registered).unwrap_or(u32::MAX))
    }

    /// Precio con moneda, p.ej. `1500 EGP`.
    pub fn price_label(&self) -> String {
        format!("{} {}", self.price, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reg_core::TicketIssuer;

    #[test]
    fn rejects_malformed_codes() {
        assert!(EventContext::new("EPRI-2025", "Conference", 10, 0, "EGP").is_ok());
        assert!(EventContext::new("", "Conference", 10, 0, "EGP").is_err());
        assert!(EventContext::new("EPRI 2025", "Conference", 10, 0, "EGP").is_err());
        assert!(EventContext::new("EPRI", "Conference", 0, 0, "EGP").is_err());
    }

    #[test]
    fn issuer_uses_uppercased_code() {
        let ctx = EventContext::new("epri", "Conference", 10, 1500, "EGP").unwrap();
        assert_eq!(ctx.ticket_prefix(), "EPRI");
        assert!(ctx.ticket_issuer().issue().starts_with("EPRI-"));
        assert_eq!(ctx.seats_left(4), 6);
        assert_eq!(ctx.seats_left(40), 0);
        assert_eq!(ctx.price_label(), "1500 EGP");
    }
}
