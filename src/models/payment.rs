//! Modelo de pago

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pago aplicado contra un envío. Solo se inserta, nunca se edita.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub shipment_id: i64,
    pub amount: f64,
    pub method: String,
    pub created_at: DateTime<Utc>,
}
