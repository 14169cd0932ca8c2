//! Recorre los seis escenarios de inscripción contra el servicio simulado
//! e imprime el resultado de cada uno.
use std::error::Error;

use epri_registration::{init_logging, AppConfig, RegistrationApp};
use reg_core::{Attachment, InMemoryRecordStore, Wizard, WizardError};
use reg_domain::fields::*;
use reg_domain::{Locale, PaymentMethod};

fn report(label: &str, wizard: &Wizard) {
    let view = wizard.view();
    println!("[{label}] step {}/{} phase={:?} issues={:?} rejection={}",
             view.current_step,
             view.step_count,
             view.phase,
             view.issues.iter().map(|i| i.field.as_str()).collect::<Vec<_>>(),
             view.last_rejection.map(|e| e.to_string()).unwrap_or_else(|| "-".into()));
}

fn fill_personal_info(wizard: &mut Wizard) -> Result<(), WizardError> {
    wizard.set_field(FULL_NAME, "Bob")?;
    wizard.set_field(EMAIL, "bob@example.com")?;
    wizard.set_field(PHONE, "01234567890")?;
    wizard.set_field(ORGANIZATION, "EPRI")?;
    wizard.set_field(JOB_TITLE, "Engineer")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let config = AppConfig::from_env()?;
    let mut app = RegistrationApp::new(&config, Locale::En, InMemoryRecordStore::new())?;

    // 1. nombre vacío: el wizard no avanza
    let mut wizard = app.start();
    wizard.set_field(FULL_NAME, "")?;
    let _ = wizard.next();
    report("1 empty name", &wizard);

    // 2. datos personales completos
    fill_personal_info(&mut wizard)?;
    wizard.next()?;
    report("2 personal info", &wizard);

    // 3. pago en línea deshabilitado
    let _ = wizard.select_option(PAYMENT_METHOD, PaymentMethod::Online.key());
    report("3 online payment", &wizard);

    // 4. transferencia bancaria
    wizard.select_option(PAYMENT_METHOD, PaymentMethod::BankTransfer.key())?;
    wizard.next()?;
    report("4 bank transfer", &wizard);
    for line in PaymentMethod::BankTransfer.instructions(app.context()) {
        println!("    {}: {}", line.label.resolve(Locale::En), line.value);
    }

    // 5. recibo válido y envío
    wizard.set_field(RECEIPT, Attachment::new("receipt.pdf", "application/pdf", 512 * 1024))?;
    let record = app.submit(&mut wizard).await?;
    report("5 submit", &wizard);
    println!("    ticket {}", record.ticket().unwrap_or_default());

    // 6. fallo transitorio y reintento
    let mut retry = app.start();
    fill_personal_info(&mut retry)?;
    retry.next()?;
    retry.select_option(PAYMENT_METHOD, PaymentMethod::Cash.key())?;
    retry.next()?;
    retry.set_field(RECEIPT, Attachment::new("receipt.jpg", "image/jpeg", 300 * 1024))?;
    app.gateway().fail_next(1);
    if let Err(e) = app.submit(&mut retry).await {
        report("6 failed attempt", &retry);
        println!("    retryable={} ({e})", e.is_retryable());
    }
    let record = app.submit(&mut retry).await?;
    report("6 retry", &retry);
    println!("    ticket {} after {} attempts, {} record(s) stored",
             record.ticket().unwrap_or_default(),
             record.attempts,
             app.store().len());
    Ok(())
}
