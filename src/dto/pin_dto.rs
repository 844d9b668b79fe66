//! DTOs de PINes de entrega

use serde::{Deserialize, Serialize};

/// Request para asegurar o consultar el PIN de un teléfono
#[derive(Debug, Deserialize)]
pub struct PinRequest {
    #[serde(default)]
    pub phone: String,
    /// Flag de administrador declarado en el body (alternativa al header)
    #[serde(default)]
    pub admin: bool,
}

/// Respuesta de `POST /pins/ensure`
#[derive(Debug, Serialize)]
pub struct EnsurePinResponse {
    pub created: bool,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

/// Respuesta de `POST /pins/lookup` (siempre expone el PIN)
#[derive(Debug, Serialize)]
pub struct LookupPinResponse {
    pub pin: String,
    pub created: bool,
    pub phone: String,
}
