use async_trait::async_trait;
use reg_core::{Attachment, ChoiceOption, ChoiceSet, FieldRule, FieldStep, GatewayError, InMemoryRecordStore, RecordStore,
               RegistrationGateway, RegistrationRequest, SubmissionPipeline, SubmissionStatus, TimestampTicketIssuer, Wizard,
               WizardDefinition, WizardError, WizardEventKind, WizardPhase};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Gateway de prueba: responde según un guion y registra las peticiones.
#[derive(Default)]
struct ScriptedGateway {
    script: Mutex<VecDeque<Result<(), GatewayError>>>,
    delay: Duration,
    seen: Mutex<Vec<RegistrationRequest>>,
}

impl ScriptedGateway {
    fn new(script: Vec<Result<(), GatewayError>>) -> Self {
        Self { script: Mutex::new(script.into()),
               ..Default::default() }
    }

    fn slow(delay: Duration) -> Self {
        Self { delay,
               ..Default::default() }
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl RegistrationGateway for ScriptedGateway {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError> {
        self.seen.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

fn definition() -> Arc<WizardDefinition> {
    Wizard::builder().step(FieldStep::new(1, "personal_info", "Personal").field("full_name", FieldRule::Required)
                                                                         .field("email", FieldRule::Email))
                     .step(FieldStep::new(2, "payment_method", "Payment").field("payment_method", FieldRule::Choice))
                     .step(FieldStep::new(3, "receipt_upload", "Receipt").field("receipt", FieldRule::receipt()))
                     .choices(ChoiceSet::new("payment_method",
                                             vec![ChoiceOption::enabled("bank", "Bank transfer"),
                                                  ChoiceOption::disabled("online", "Online payment")]))
                     .build()
                     .unwrap()
}

fn completed_wizard() -> Wizard {
    let mut w = Wizard::new(definition());
    w.set_field("full_name", "Bob").unwrap();
    w.set_field("email", "bob@example.com").unwrap();
    w.next().unwrap();
    w.select_option("payment_method", "bank").unwrap();
    w.next().unwrap();
    w.set_field("receipt", Attachment::new("receipt.pdf", "application/pdf", 200_000)).unwrap();
    w
}

fn pipeline(gateway: ScriptedGateway) -> SubmissionPipeline<ScriptedGateway, InMemoryRecordStore, TimestampTicketIssuer> {
    SubmissionPipeline::new(gateway, InMemoryRecordStore::new(), TimestampTicketIssuer::new("EPRI"))
}

#[tokio::test]
async fn successful_submission_issues_prefixed_ticket() {
    let mut w = completed_wizard();
    let snapshot = w.form().clone();
    let mut p = pipeline(ScriptedGateway::new(vec![]));

    let record = p.submit(&mut w).await.expect("submission succeeds");
    assert_eq!(record.status, SubmissionStatus::Completed);
    assert!(record.ticket().unwrap().starts_with("EPRI-"));
    assert_eq!(record.fields, snapshot);
    assert_eq!(w.phase(), WizardPhase::Submitted);
    // el formulario y el adjunto se liberan al terminar
    assert!(w.form().is_empty());
    assert!(w.attachment("receipt").is_none());

    let stored = p.store().find_by_ticket(record.ticket().unwrap()).unwrap();
    assert_eq!(stored.as_ref(), Some(&record));
}

#[tokio::test]
async fn resubmitting_after_completion_returns_same_record() {
    let mut w = completed_wizard();
    let mut p = pipeline(ScriptedGateway::new(vec![]));
    let first = p.submit(&mut w).await.unwrap();
    let second = p.submit(&mut w).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(p.store().len(), 1);
    assert_eq!(p.gateway().calls(), 1);
}

#[tokio::test]
async fn failure_preserves_form_and_retry_reuses_record() {
    let mut w = completed_wizard();
    let before = w.form().clone();
    let mut p = pipeline(ScriptedGateway::new(vec![Err(GatewayError::Unavailable("connection reset".into()))]));

    let err = p.submit(&mut w).await.unwrap_err();
    assert!(matches!(err, WizardError::Submission(_)));
    assert!(err.is_retryable());
    assert_eq!(w.form(), &before);
    assert_eq!(w.phase(), WizardPhase::Editing);
    assert_eq!(w.current_step(), 3);
    assert_eq!(w.last_rejection(), Some(&err));
    let failed = w.record().cloned().unwrap();
    assert_eq!(failed.status, SubmissionStatus::Failed);
    assert!(failed.last_error.is_some());

    let ok = p.submit(&mut w).await.unwrap();
    assert_eq!(ok.id, failed.id);
    assert_eq!(ok.attempts, 2);
    assert_eq!(ok.status, SubmissionStatus::Completed);
    assert_eq!(p.store().len(), 1);
}

#[tokio::test]
async fn timeout_marks_record_failed() {
    let mut w = completed_wizard();
    let mut p = pipeline(ScriptedGateway::slow(Duration::from_millis(500))).with_timeout(Duration::from_millis(20));
    let err = p.submit(&mut w).await.unwrap_err();
    assert_eq!(err, WizardError::Timeout(20));
    let stored = p.store().list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, SubmissionStatus::Failed);
    assert_eq!(w.phase(), WizardPhase::Editing);
}

#[tokio::test]
async fn dropping_an_in_flight_submission_resolves_the_record() {
    let mut w = completed_wizard();
    let before = w.form().clone();
    let mut p = pipeline(ScriptedGateway::slow(Duration::from_millis(500)));

    let cancelled = tokio::time::timeout(Duration::from_millis(20), p.submit(&mut w)).await;
    assert!(cancelled.is_err(), "outer timeout should cancel the submission");

    assert_eq!(w.phase(), WizardPhase::Editing);
    assert_eq!(w.form(), &before);
    let stored = p.store().list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, SubmissionStatus::Failed);
    assert_eq!(w.event_codes().last(), Some(&"F"));
}

#[tokio::test]
async fn submit_requires_final_step_and_full_validity() {
    let mut w = Wizard::new(definition());
    let mut p = pipeline(ScriptedGateway::new(vec![]));
    assert_eq!(p.submit(&mut w).await.unwrap_err(), WizardError::NotAtFinalStep);

    let mut w = completed_wizard();
    w.clear_field("receipt").unwrap();
    let err = p.submit(&mut w).await.unwrap_err();
    assert!(matches!(err, WizardError::Validation { step: 3, .. }));

    // un campo de un step anterior invalidado tras avanzar también se detecta
    let mut w = completed_wizard();
    w.set_field("email", "not-an-email").unwrap();
    let err = p.submit(&mut w).await.unwrap_err();
    assert!(matches!(err, WizardError::Validation { step: 1, .. }));

    assert_eq!(p.gateway().calls(), 0);
    assert!(p.store().is_empty());
}

#[tokio::test]
async fn transitions_after_submission_are_rejected() {
    let mut w = completed_wizard();
    let mut p = pipeline(ScriptedGateway::new(vec![]));
    p.submit(&mut w).await.unwrap();
    assert_eq!(w.previous(), Err(WizardError::AlreadySubmitted));
    assert_eq!(w.set_field("full_name", "Eve"), Err(WizardError::AlreadySubmitted));
}

#[test]
fn event_log_records_submission_lifecycle() {
    let mut w = completed_wizard();
    let mut p = pipeline(ScriptedGateway::new(vec![Err(GatewayError::Unavailable("down".into())), Ok(())]));
    let _ = tokio_test::block_on(p.submit(&mut w));
    let record = tokio_test::block_on(p.submit(&mut w)).unwrap();

    let kinds: Vec<WizardEventKind> = w.events().into_iter().map(|e| e.kind).collect();
    let starts: Vec<u32> = kinds.iter()
                                .filter_map(|k| match k {
                                    WizardEventKind::SubmissionStarted { attempt, .. } => Some(*attempt),
                                    _ => None,
                                })
                                .collect();
    assert_eq!(starts, vec![1, 2]);
    assert!(kinds.iter()
                 .any(|k| matches!(k, WizardEventKind::SubmissionCompleted { ticket, .. } if Some(ticket.as_str()) == record.ticket())));
    // los dos intentos enviaron exactamente los mismos campos
    let fingerprints: Vec<&String> = kinds.iter()
                                          .filter_map(|k| match k {
                                              WizardEventKind::SubmissionStarted { fingerprint, .. } => Some(fingerprint),
                                              _ => None,
                                          })
                                          .collect();
    assert_eq!(fingerprints[0], fingerprints[1]);
}
