//! DTOs de envíos

use crate::models::Shipment;
use serde::{Deserialize, Serialize};

/// Request para registrar un envío
#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    pub barcode: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub customer_name: String,
    pub quantity: Option<i32>,
    pub weight: Option<f64>,
    pub price: Option<f64>,
    pub paid_amount: Option<f64>,
    pub status: Option<String>,
    pub delivery_status: Option<String>,
    pub location: Option<String>,
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub delivery_note: Option<String>,
    pub courier: Option<String>,
}

/// Patch tipado para la actualización completa (PUT).
///
/// Solo estos campos son sobre-escribibles por el cliente; los campos
/// calculados por el servidor (balance, timestamps, delivered_at) no
/// aparecen aquí.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateShipmentRequest {
    pub barcode: Option<String>,
    pub phone: Option<String>,
    pub customer_name: Option<String>,
    pub quantity: Option<i32>,
    pub weight: Option<f64>,
    pub price: Option<f64>,
    pub paid_amount: Option<f64>,
    pub status: Option<String>,
    pub delivery_status: Option<String>,
    pub location: Option<String>,
    pub arrival_date: Option<String>,
    pub notes: Option<String>,
    pub delivery_note: Option<String>,
    pub courier: Option<String>,
    /// PIN de entrega presentado por el cliente
    pub pin: Option<String>,
    /// Bypass de administrador declarado en el body
    #[serde(default)]
    pub admin: bool,
    #[serde(rename = "adminBypass", default)]
    pub admin_bypass: bool,
}

/// Patch ligero de estado (PATCH /shipments/:id/status)
#[derive(Debug, Default, Deserialize)]
pub struct StatusPatchRequest {
    pub status: Option<String>,
    pub location: Option<String>,
    pub delivery_status: Option<String>,
}

/// Query de listado con filtros y paginación
#[derive(Debug, Default, Deserialize)]
pub struct ListShipmentsQuery {
    pub phone: Option<String>,
    pub barcode: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "dateFrom")]
    pub date_from: Option<String>,
    #[serde(rename = "dateTo")]
    pub date_to: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Metadatos de paginación
#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

/// Respuesta del listado de envíos
#[derive(Debug, Serialize)]
pub struct ShipmentListResponse {
    pub data: Vec<Shipment>,
    pub meta: ListMeta,
}
