//! DTOs de pagos

use crate::models::{Payment, Shipment};
use serde::{Deserialize, Serialize};

/// Request para registrar un pago
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: f64,
    pub method: Option<String>,
}

/// Respuesta al registrar un pago: el envío actualizado más el historial
/// completo (más reciente primero)
#[derive(Debug, Serialize)]
pub struct PaymentRecordedResponse {
    pub shipment: Shipment,
    pub payments: Vec<Payment>,
}
