use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::form::FormData;

/// Petición enviada al servicio externo de registro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub record_id: Uuid,
    pub attempt: u32,
    pub fields: FormData,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Falla transitoria (red, servidor caído).
    #[error("registration service unavailable: {0}")]
    Unavailable(String),
    /// El servicio rechazó la solicitud (p. ej. cupo agotado).
    #[error("registration rejected: {0}")]
    Rejected(String),
}

/// Servicio externo de registro (caja negra asíncrona).
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError>;
}
