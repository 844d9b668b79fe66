//! Modelo de PIN de cliente

use chrono::{DateTime, Utc};
use serde::Serialize;

/// PIN de entrega de un cliente, indexado por teléfono normalizado.
///
/// El plaintext se conserva a propósito para que el personal pueda
/// dictárselo al cliente por teléfono. Es un código de 4 dígitos de baja
/// seguridad, no una frontera criptográfica.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerPin {
    pub phone: String,
    pub pin_hash: String,
    pub pin_plain: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
