//! Modelo de envío (shipment)

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Registro de un envío con su estado de pago y de entrega.
///
/// `pin_plain` no vive en la tabla `shipments`: se adjunta en lectura
/// desde `customer_pins` casando el teléfono normalizado.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Shipment {
    pub id: i64,
    pub barcode: String,
    pub phone: String,
    pub customer_name: String,
    pub quantity: i32,
    pub weight: f64,
    pub price: f64,
    pub paid_amount: f64,
    pub balance: f64,
    pub status: String,
    pub delivery_status: String,
    pub location: String,
    pub arrival_date: Option<NaiveDate>,
    pub notes: String,
    pub delivery_note: Option<String>,
    pub courier: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub pin_plain: Option<String>,
}

/// Estados de pago reconocidos por la UI (la columna es texto libre)
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";

/// Ubicaciones de custodia
pub const LOCATION_WAREHOUSE: &str = "warehouse";
pub const LOCATION_DELIVERY: &str = "delivery";

/// Sub-estados de entrega
pub const DELIVERY_WAREHOUSE: &str = "warehouse";
pub const DELIVERY_IN_DELIVERY: &str = "delivery";
pub const DELIVERY_DELIVERED: &str = "delivered";
pub const DELIVERY_CANCELED: &str = "canceled";
pub const DELIVERY_PENDING: &str = "pending";
