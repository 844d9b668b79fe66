//! Gate de entrega
//!
//! Regla que gobierna el paso de un envío de custodia de almacén a
//! custodia de entrega. El paso hacia `delivery` exige teléfono y PIN
//! verificado, salvo bypass de administrador. Los movimientos dentro de
//! la entrega (marcar entregado) y la vuelta al almacén no piden PIN.
//!
//! El gate corre solo en la actualización completa (PUT); el patch de
//! estado es un fast-path para llamadores internos de confianza y no lo
//! invoca.

use crate::services::pin_service::PinService;
use crate::utils::errors::{bad_request_error, AppError, AppResult};
use crate::utils::phone::normalize_phone;

pub struct DeliveryGate<'a> {
    pins: &'a PinService,
}

impl<'a> DeliveryGate<'a> {
    pub fn new(pins: &'a PinService) -> Self {
        Self { pins }
    }

    /// Autorizar la transición hacia entrega. No persiste nada del envío:
    /// si rechaza, el update completo se aborta.
    pub async fn authorize(
        &self,
        phone: &str,
        pin_input: &str,
        admin_bypass: bool,
    ) -> AppResult<()> {
        if normalize_phone(phone).is_empty() {
            return Err(missing_phone_rejection());
        }

        if admin_bypass {
            // El bypass no verifica, pero deja un PIN acuñado para que las
            // próximas transiciones sin bypass tengan contra qué verificar.
            self.pins.ensure(phone, false).await?;
            return Ok(());
        }

        let ensured = self.pins.ensure(phone, false).await?;
        if self.pins.verify(phone, pin_input).await? {
            return Ok(());
        }

        Err(pin_rejection(ensured.created))
    }
}

/// Rechazo por teléfono ausente: sin teléfono no hay a quién acuñarle PIN
pub fn missing_phone_rejection() -> AppError {
    bad_request_error("Se requiere el teléfono del cliente para pasar el envío a entrega.")
}

/// Rechazo 403 con `pinCreated`, para que la UI distinga "se acaba de
/// crear un PIN, consúltelo" de "ya existía un PIN, consúltelo"
pub fn pin_rejection(pin_created: bool) -> AppError {
    let message = if pin_created {
        "Se creó un PIN de entrega de 4 dígitos para este teléfono. Consúltelo con el almacén e inténtelo de nuevo."
    } else {
        "Se requiere el PIN de entrega. Consúltelo con el almacén y vuelva a enviar la solicitud."
    };
    AppError::PinRequired {
        message: message.to_string(),
        pin_created,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_pin_rejection_reports_creation() {
        match pin_rejection(true) {
            AppError::PinRequired { pin_created, .. } => assert!(pin_created),
            other => panic!("variante inesperada: {:?}", other),
        }
        match pin_rejection(false) {
            AppError::PinRequired { pin_created, .. } => assert!(!pin_created),
            other => panic!("variante inesperada: {:?}", other),
        }
    }

    #[test]
    fn test_pin_rejection_maps_to_403() {
        let response = pin_rejection(false).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_phone_maps_to_400() {
        let response = missing_phone_rejection().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pin_rejection_body_shape() {
        let response = pin_rejection(true).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["code"], "PIN_REQUIRED");
        assert_eq!(body["pinCreated"], true);
        assert!(body["message"].is_string());
    }
}
