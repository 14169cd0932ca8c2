//! Métodos de pago del paso 2.
//!
//! `Online` se muestra deshabilitado: el pago en línea todavía no existe y el
//! wizard debe rechazar cualquier intento de seleccionarlo.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{fields, DomainError, EventContext, Locale, LocalizedText};
use reg_core::{ChoiceOption, ChoiceSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "bank")]
    BankTransfer,
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "online")]
    Online,
}

/// Línea de instrucciones; `copyable` indica que la UI ofrece copiarla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInstruction {
    pub label: LocalizedText,
    pub value: String,
    pub copyable: bool,
}

impl PaymentInstruction {
    fn copyable(label: LocalizedText, value: impl Into<String>) -> Self {
        Self { label,
               value: value.into(),
               copyable: true }
    }

    fn note(label: LocalizedText, value: impl Into<String>) -> Self {
        Self { label,
               value: value.into(),
               copyable: false }
    }
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::BankTransfer, PaymentMethod::Cash, PaymentMethod::Online];

    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
        }
    }

    pub fn label(&self) -> LocalizedText {
        match self {
            PaymentMethod::BankTransfer => LocalizedText::en_ar("Bank transfer", "تحويل بنكي"),
            PaymentMethod::Cash => LocalizedText::en_ar("Cash at the institute", "نقداً في المعهد"),
            PaymentMethod::Online => LocalizedText::en_ar("Online payment (coming soon)", "الدفع الإلكتروني (قريباً)"),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, PaymentMethod::Online)
    }

    pub fn instructions(&self, ctx: &EventContext) -> Vec<PaymentInstruction> {
        let amount = PaymentInstruction::note(LocalizedText::en_ar("Amount", "المبلغ"), ctx.price_label());
        match self {
            PaymentMethod::BankTransfer => {
                let mut lines = vec![amount];
                if let Some(bank) = &ctx.bank {
                    lines.push(PaymentInstruction::note(LocalizedText::en_ar("Bank", "البنك"), &bank.bank_name));
                    lines.push(PaymentInstruction::note(LocalizedText::en_ar("Account name", "اسم الحساب"),
                                                        &bank.account_name));
                    lines.push(PaymentInstruction::copyable(LocalizedText::en_ar("Account number", "رقم الحساب"),
                                                            &bank.account_number));
                    lines.push(PaymentInstruction::copyable("IBAN".into(), &bank.iban));
                    lines.push(PaymentInstruction::copyable("SWIFT".into(), &bank.swift));
                }
                lines.push(PaymentInstruction::copyable(LocalizedText::en_ar("Transfer reference", "مرجع التحويل"),
                                                        ctx.ticket_prefix()));
                lines
            }
            PaymentMethod::Cash => {
                vec![amount,
                     PaymentInstruction::note(LocalizedText::en_ar("Where", "المكان"), "Institute treasury, main building")]
            }
            PaymentMethod::Online => Vec::new(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL.into_iter()
                          .find(|m| m.key() == s)
                          .ok_or_else(|| DomainError::UnknownValue(format!("payment method '{s}'")))
    }
}

/// Opciones del campo `payment_method` con las etiquetas en `locale`.
pub fn payment_choices(locale: Locale) -> ChoiceSet {
    let options = PaymentMethod::ALL.iter()
                                    .map(|m| {
                                        let label = m.label().resolve(locale).to_string();
                                        if m.is_available() {
                                            ChoiceOption::enabled(m.key(), label)
                                        } else {
                                            ChoiceOption::disabled(m.key(), label)
                                        }
                                    })
                                    .collect();
    ChoiceSet::new(fields::PAYMENT_METHOD, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BankAccount;

    #[test]
    fn online_is_listed_but_not_selectable() {
        let set = payment_choices(Locale::En);
        assert_eq!(set.options.len(), 3);
        assert!(set.ensure_selectable("bank").is_ok());
        assert!(set.ensure_selectable("cash").is_ok());
        assert!(set.ensure_selectable("online").is_err());
        assert_eq!(payment_choices(Locale::Ar).option("bank").map(|o| o.label.as_str()), Some("تحويل بنكي"));
    }

    #[test]
    fn keys_roundtrip_through_from_str() {
        for m in PaymentMethod::ALL {
            assert_eq!(m.key().parse::<PaymentMethod>(), Ok(m));
        }
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn bank_instructions_expose_copyable_codes() {
        let ctx = EventContext::new("EPRI", "Conference", 10, 1500, "EGP").unwrap()
                                                                          .with_bank(BankAccount { bank_name: "National Bank".into(),
                                                                                                   account_name: "EPRI".into(),
                                                                                                   account_number: "100200300".into(),
                                                                                                   iban: "EG380019000500000000263180002".into(),
                                                                                                   swift: "NBEGEGCX".into() });
        let lines = PaymentMethod::BankTransfer.instructions(&ctx);
        let copyable: Vec<&str> = lines.iter().filter(|l| l.copyable).map(|l| l.value.as_str()).collect();
        assert_eq!(copyable, vec!["100200300", "EG380019000500000000263180002", "NBEGEGCX", "EPRI"]);
        assert!(PaymentMethod::Online.instructions(&ctx).is_empty());
    }
}
