//! Controller de PINes de entrega

use crate::config::EnvironmentConfig;
use crate::dto::pin_dto::{EnsurePinResponse, LookupPinResponse, PinRequest};
use crate::services::pin_service::PinService;
use crate::utils::errors::{bad_request_error, AppError, AppResult};
use crate::utils::phone::normalize_phone;
use sqlx::PgPool;

pub struct PinController {
    pins: PinService,
}

impl PinController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            pins: PinService::new(pool, config.pin_secret.clone()),
        }
    }

    /// Asegurar que el teléfono tenga PIN. El plaintext solo se expone a
    /// llamadores con credencial de administrador.
    pub async fn ensure(
        &self,
        request: PinRequest,
        admin_header: bool,
    ) -> AppResult<EnsurePinResponse> {
        let normalized = normalize_phone(&request.phone);
        if normalized.is_empty() {
            return Err(bad_request_error("Número de teléfono inválido."));
        }

        let expose = request.admin || admin_header;
        let ensured = self.pins.ensure(&normalized, expose).await?;

        Ok(EnsurePinResponse {
            created: ensured.created,
            phone: normalized,
            pin: ensured.pin,
        })
    }

    /// Consultar (y acuñar si falta) el PIN de un teléfono. Pensado para
    /// uso interno de confianza: siempre expone el plaintext.
    pub async fn lookup(&self, request: PinRequest) -> AppResult<LookupPinResponse> {
        let normalized = normalize_phone(&request.phone);
        if normalized.is_empty() {
            return Err(bad_request_error("Número de teléfono inválido."));
        }

        let ensured = self.pins.ensure(&normalized, true).await?;
        let pin = ensured
            .pin
            .ok_or_else(|| AppError::Internal("No se pudo generar el PIN".to_string()))?;

        Ok(LookupPinResponse {
            pin,
            created: ensured.created,
            phone: normalized,
        })
    }
}
