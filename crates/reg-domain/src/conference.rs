//! Flujo de inscripción a la conferencia: tres steps sobre `reg-core`.
use serde::Serialize;
use std::sync::Arc;

use crate::fields::*;
use crate::{payment_choices, DomainError, Locale, LocalizedText, PaymentMethod};
use reg_core::{Attachment, FieldRule, FieldStep, FormData, Wizard, WizardDefinition, WizardError};

fn step_title(index: usize) -> LocalizedText {
    match index {
        1 => LocalizedText::en_ar("Personal information", "البيانات الشخصية"),
        2 => LocalizedText::en_ar("Payment method", "طريقة الدفع"),
        _ => LocalizedText::en_ar("Upload receipt", "رفع الإيصال"),
    }
}

/// Definición de los tres steps con títulos y opciones de pago en `locale`.
pub fn conference_definition(locale: Locale) -> Result<Arc<WizardDefinition>, WizardError> {
    let personal = FieldStep::new(1, STEP_PERSONAL_INFO, step_title(1).resolve(locale)).field(FULL_NAME, FieldRule::Required)
                                                                                        .field(EMAIL, FieldRule::Email)
                                                                                        .field(PHONE, FieldRule::Phone)
                                                                                        .field(ORGANIZATION, FieldRule::Required)
                                                                                        .field(JOB_TITLE, FieldRule::Required);
    let payment = FieldStep::new(2, STEP_PAYMENT_METHOD, step_title(2).resolve(locale)).field(PAYMENT_METHOD, FieldRule::Choice);
    let receipt = FieldStep::new(3, STEP_RECEIPT_UPLOAD, step_title(3).resolve(locale)).field(RECEIPT, FieldRule::receipt());

    Wizard::builder().step(personal)
                     .step(payment)
                     .step(receipt)
                     .choices(payment_choices(locale))
                     .build()
}

/// Vista tipada de un formulario completo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceRegistration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub job_title: String,
    pub payment: PaymentMethod,
    pub receipt: Attachment,
}

impl ConferenceRegistration {
    pub fn from_form(form: &FormData) -> Result<Self, DomainError> {
        let text = |field: &str| {
            form.text(field)
                .map(|v| v.trim().to_string())
                .ok_or_else(|| DomainError::MissingField(field.to_string()))
        };
        let payment = form.choice(PAYMENT_METHOD)
                          .ok_or_else(|| DomainError::MissingField(PAYMENT_METHOD.to_string()))?
                          .parse()?;
        let receipt = form.attachment(RECEIPT)
                          .cloned()
                          .ok_or_else(|| DomainError::MissingField(RECEIPT.to_string()))?;
        Ok(Self { full_name: text(FULL_NAME)?,
                  email: text(EMAIL)?,
                  phone: text(PHONE)?,
                  organization: text(ORGANIZATION)?,
                  job_title: text(JOB_TITLE)?,
                  payment,
                  receipt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reg_core::FieldValue;

    #[test]
    fn definition_has_three_ordered_steps() {
        let def = conference_definition(Locale::En).unwrap();
        let ids: Vec<&str> = def.steps().map(|s| s.id()).collect();
        assert_eq!(ids, vec![STEP_PERSONAL_INFO, STEP_PAYMENT_METHOD, STEP_RECEIPT_UPLOAD]);
        assert_eq!(def.owner_of(JOB_TITLE), Some(1));
        assert_eq!(def.owner_of(RECEIPT), Some(3));
        assert!(def.choice_for(PAYMENT_METHOD).is_some());
    }

    #[test]
    fn localized_titles_do_not_change_the_structure_hash() {
        let en = conference_definition(Locale::En).unwrap();
        let ar = conference_definition(Locale::Ar).unwrap();
        assert_eq!(ar.step(1).map(|s| s.title().to_string()), Some("البيانات الشخصية".to_string()));
        assert_eq!(en.definition_hash(), ar.definition_hash());
    }

    #[test]
    fn from_form_extracts_typed_view() {
        let form: FormData = [(FULL_NAME, FieldValue::text(" Bob ")),
                              (EMAIL, FieldValue::text("bob@example.com")),
                              (PHONE, FieldValue::text("01234567890")),
                              (ORGANIZATION, FieldValue::text("EPRI")),
                              (JOB_TITLE, FieldValue::text("Engineer")),
                              (PAYMENT_METHOD, FieldValue::choice("cash")),
                              (RECEIPT, FieldValue::File(Attachment::new("r.pdf", "application/pdf", 1024)))].into_iter()
                                                                                                                 .collect();
        let reg = ConferenceRegistration::from_form(&form).unwrap();
        assert_eq!(reg.full_name, "Bob");
        assert_eq!(reg.payment, PaymentMethod::Cash);

        let mut partial = form.clone();
        partial.remove(RECEIPT);
        assert_eq!(ConferenceRegistration::from_form(&partial),
                   Err(DomainError::MissingField(RECEIPT.to_string())));
    }
}
