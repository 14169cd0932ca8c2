//! Servicio de registro simulado para demos, CLI y tests.
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

use reg_core::{GatewayError, RegistrationGateway, RegistrationRequest};

/// Acepta inscripciones tras `latency` hasta agotar `capacity`. Un mismo
/// `record_id` sólo ocupa una plaza aunque se reenvíe.
#[derive(Debug, Default)]
pub struct SimulatedGateway {
    latency: Duration,
    capacity: Option<usize>,
    pending_failures: AtomicU32,
    accepted: Mutex<HashSet<Uuid>>,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency,
               ..Default::default() }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Las próximas `n` llamadas fallan con `GatewayError::Unavailable`.
    pub fn fail_next(&self, n: u32) {
        self.pending_failures.store(n, Ordering::SeqCst);
    }

    pub fn accepted(&self) -> usize {
        self.accepted.lock().map(|set| set.len()).unwrap_or_default()
    }

    fn take_failure(&self) -> bool {
        self.pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl RegistrationGateway for SimulatedGateway {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.take_failure() {
            debug!("simulated transient failure for record {}", request.record_id);
            return Err(GatewayError::Unavailable("simulated transient failure".into()));
        }
        let mut accepted = self.accepted
                               .lock()
                               .map_err(|_| GatewayError::Unavailable("registration registry poisoned".into()))?;
        if accepted.contains(&request.record_id) {
            return Ok(());
        }
        if let Some(capacity) = self.capacity {
            if accepted.len() >= capacity {
                return Err(GatewayError::Rejected("registration closed".into()));
            }
        }
        accepted.insert(request.record_id);
        info!("gateway accepted record {} (attempt {})", request.record_id, request.attempt);
        Ok(())
    }
}
