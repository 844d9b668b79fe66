//! Reglas del ciclo de vida de un envío
//!
//! Funciones puras sobre el estado de un envío: derivación del sub-estado
//! de entrega, cálculo de balance, merge del PUT y patch de estado. Las
//! escrituras viven en el repositorio; aquí solo se decide qué escribir.

use crate::dto::shipment_dto::{StatusPatchRequest, UpdateShipmentRequest};
use crate::models::shipment::{
    Shipment, DELIVERY_CANCELED, DELIVERY_DELIVERED, DELIVERY_IN_DELIVERY, DELIVERY_PENDING,
    DELIVERY_WAREHOUSE, LOCATION_DELIVERY, LOCATION_WAREHOUSE, STATUS_PAID, STATUS_PENDING,
};
use crate::repositories::shipment_repository::StatusPatch;
use chrono::{DateTime, NaiveDate, Utc};

/// Balance pendiente de cobro
pub fn compute_balance(price: f64, paid_amount: f64) -> f64 {
    price - paid_amount
}

/// ¿La ubicación apunta a custodia de entrega?
pub fn is_delivery_location(location: &str) -> bool {
    location.trim().eq_ignore_ascii_case(LOCATION_DELIVERY)
}

/// Derivar el sub-estado de entrega cuando la request no lo trae:
/// `delivery` → `delivery`, cualquier otra ubicación → `warehouse`.
pub fn derive_delivery_status(location: &str, delivery_status: Option<&str>) -> String {
    if let Some(ds) = delivery_status {
        if !ds.trim().is_empty() {
            return ds.to_string();
        }
    }
    if is_delivery_location(location) {
        DELIVERY_IN_DELIVERY.to_string()
    } else {
        DELIVERY_WAREHOUSE.to_string()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Merge del PUT: los campos presentes en la request pisan al registro
/// existente, el resto se conserva. El balance se recalcula siempre a
/// partir del precio y el pagado resultantes.
pub fn merge_update(
    existing: &Shipment,
    request: &UpdateShipmentRequest,
    arrival_date: Option<NaiveDate>,
) -> Shipment {
    let mut merged = existing.clone();

    if let Some(barcode) = non_empty(request.barcode.as_ref()) {
        merged.barcode = barcode;
    }
    // Un teléfono vacío en la request no borra el almacenado: el gate de
    // entrega debe seguir viendo el teléfono que ya tenía el envío.
    if let Some(phone) = non_empty(request.phone.as_ref()) {
        merged.phone = phone.trim().to_string();
    }
    if let Some(customer_name) = &request.customer_name {
        merged.customer_name = customer_name.trim().to_string();
    }
    if let Some(notes) = &request.notes {
        merged.notes = notes.clone();
    }
    if let Some(delivery_note) = &request.delivery_note {
        merged.delivery_note = Some(delivery_note.clone());
    }
    if let Some(courier) = &request.courier {
        merged.courier = Some(courier.clone());
    }
    if let Some(arrival_date) = arrival_date {
        merged.arrival_date = Some(arrival_date);
    }

    merged.quantity = request.quantity.filter(|q| *q > 0).unwrap_or(existing.quantity);
    merged.weight = request.weight.unwrap_or(existing.weight);
    merged.price = request.price.unwrap_or(existing.price);
    merged.paid_amount = request.paid_amount.unwrap_or(existing.paid_amount);
    merged.balance = compute_balance(merged.price, merged.paid_amount);

    if let Some(status) = non_empty(request.status.as_ref()) {
        merged.status = status;
    }

    merged.location = non_empty(request.location.as_ref())
        .unwrap_or_else(|| existing.location.clone())
        .to_lowercase();

    // Hacia entrega el sub-estado viene de la request (o queda en
    // `delivery`); en cualquier otra ubicación vuelve a `warehouse`.
    merged.delivery_status = if is_delivery_location(&merged.location) {
        non_empty(request.delivery_status.as_ref())
            .or_else(|| non_empty(Some(&existing.delivery_status)))
            .unwrap_or_else(|| DELIVERY_IN_DELIVERY.to_string())
    } else {
        DELIVERY_WAREHOUSE.to_string()
    };

    merged
}

/// Resultado de aplicar un pago sobre un envío
#[derive(Debug)]
pub struct PaymentOutcome {
    pub paid_amount: f64,
    pub balance: f64,
    pub status: String,
}

/// Aplicar un pago: acumula lo pagado, recalcula el balance y, si el
/// balance queda en cero o menos, fuerza el estado a `paid`. Un pago
/// parcial no toca el estado.
pub fn apply_payment(existing: &Shipment, amount: f64) -> PaymentOutcome {
    let paid_amount = existing.paid_amount + amount;
    let balance = compute_balance(existing.price, paid_amount);
    let status = if balance <= 0.0 {
        STATUS_PAID.to_string()
    } else {
        existing.status.clone()
    };

    PaymentOutcome {
        paid_amount,
        balance,
        status,
    }
}

/// Patch ligero de estado. No recalcula el balance salvo en el reset a
/// `pending`, que anula lo pagado y reinstala el balance completo
/// (devolución al almacén con pago anulado).
pub fn apply_status_patch(
    existing: &Shipment,
    request: &StatusPatchRequest,
    now: DateTime<Utc>,
) -> StatusPatch {
    let status = non_empty(request.status.as_ref()).unwrap_or_else(|| existing.status.clone());
    let location = non_empty(request.location.as_ref())
        .unwrap_or_else(|| {
            if existing.location.trim().is_empty() {
                LOCATION_WAREHOUSE.to_string()
            } else {
                existing.location.clone()
            }
        })
        .to_lowercase();
    let delivery_status = non_empty(request.delivery_status.as_ref())
        .or_else(|| non_empty(Some(&existing.delivery_status)))
        .unwrap_or_else(|| derive_delivery_status(&location, None));

    let delivered_at = match delivery_status.as_str() {
        DELIVERY_DELIVERED => existing.delivered_at.or(Some(now)),
        DELIVERY_CANCELED | DELIVERY_PENDING => None,
        _ => existing.delivered_at,
    };

    let (paid_amount, balance) = if status == STATUS_PENDING {
        (0.0, existing.price)
    } else {
        (existing.paid_amount, existing.balance)
    };

    StatusPatch {
        status,
        delivery_status,
        location,
        delivered_at,
        paid_amount,
        balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_shipment() -> Shipment {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap();
        Shipment {
            id: 1,
            barcode: "MC-1".to_string(),
            phone: "99205050".to_string(),
            customer_name: "Cliente".to_string(),
            quantity: 1,
            weight: 2.5,
            price: 10000.0,
            paid_amount: 4000.0,
            balance: 6000.0,
            status: "pending".to_string(),
            delivery_status: "warehouse".to_string(),
            location: "warehouse".to_string(),
            arrival_date: NaiveDate::from_ymd_opt(2026, 7, 30),
            notes: "".to_string(),
            delivery_note: None,
            courier: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
            pin_plain: None,
        }
    }

    #[test]
    fn test_compute_balance() {
        assert_eq!(compute_balance(10000.0, 4000.0), 6000.0);
        assert_eq!(compute_balance(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_derive_delivery_status() {
        assert_eq!(derive_delivery_status("delivery", None), "delivery");
        assert_eq!(derive_delivery_status("warehouse", None), "warehouse");
        assert_eq!(derive_delivery_status("delivery", Some("")), "delivery");
        assert_eq!(derive_delivery_status("delivery", Some("pending")), "pending");
    }

    #[test]
    fn test_merge_update_keeps_absent_fields() {
        let existing = sample_shipment();
        let request = UpdateShipmentRequest {
            price: Some(12000.0),
            ..Default::default()
        };

        let merged = merge_update(&existing, &request, None);

        assert_eq!(merged.barcode, "MC-1");
        assert_eq!(merged.phone, "99205050");
        assert_eq!(merged.price, 12000.0);
        assert_eq!(merged.paid_amount, 4000.0);
        // Invariante: balance = price - paid_amount tras el merge
        assert_eq!(merged.balance, 8000.0);
    }

    #[test]
    fn test_merge_update_into_delivery_defaults_substatus() {
        let existing = sample_shipment();
        let request = UpdateShipmentRequest {
            location: Some("delivery".to_string()),
            ..Default::default()
        };

        let merged = merge_update(&existing, &request, None);

        assert_eq!(merged.location, "delivery");
        assert_eq!(merged.delivery_status, "delivery");
    }

    #[test]
    fn test_merge_update_out_of_delivery_resets_substatus() {
        let mut existing = sample_shipment();
        existing.location = "delivery".to_string();
        existing.delivery_status = "delivered".to_string();

        let request = UpdateShipmentRequest {
            location: Some("warehouse".to_string()),
            ..Default::default()
        };

        let merged = merge_update(&existing, &request, None);

        assert_eq!(merged.location, "warehouse");
        assert_eq!(merged.delivery_status, "warehouse");
    }

    #[test]
    fn test_merge_update_empty_phone_keeps_existing() {
        let existing = sample_shipment();
        let request = UpdateShipmentRequest {
            phone: Some("".to_string()),
            location: Some("delivery".to_string()),
            ..Default::default()
        };

        let merged = merge_update(&existing, &request, None);

        assert_eq!(merged.phone, "99205050");
    }

    #[test]
    fn test_apply_payment_partial_keeps_status() {
        let existing = sample_shipment();

        let outcome = apply_payment(&existing, 1000.0);

        assert_eq!(outcome.paid_amount, 5000.0);
        assert_eq!(outcome.balance, 5000.0);
        assert_eq!(outcome.status, "pending");
    }

    #[test]
    fn test_apply_payment_exact_cover_flips_to_paid() {
        let existing = sample_shipment();

        // 6000 cubre exactamente el balance pendiente
        let outcome = apply_payment(&existing, 6000.0);

        assert_eq!(outcome.paid_amount, 10000.0);
        assert_eq!(outcome.balance, 0.0);
        assert_eq!(outcome.status, STATUS_PAID);
    }

    #[test]
    fn test_apply_payment_sequence() {
        let mut shipment = sample_shipment();
        shipment.paid_amount = 0.0;
        shipment.balance = 10000.0;

        let first = apply_payment(&shipment, 4000.0);
        assert_eq!(first.balance, 6000.0);
        assert_eq!(first.status, "pending");

        shipment.paid_amount = first.paid_amount;
        shipment.balance = first.balance;
        shipment.status = first.status;

        let second = apply_payment(&shipment, 6000.0);
        assert_eq!(second.balance, 0.0);
        assert_eq!(second.status, STATUS_PAID);
    }

    #[test]
    fn test_status_patch_pending_voids_payment() {
        let mut existing = sample_shipment();
        existing.status = STATUS_PAID.to_string();
        existing.paid_amount = 10000.0;
        existing.balance = 0.0;

        let request = StatusPatchRequest {
            status: Some("pending".to_string()),
            ..Default::default()
        };

        let patch = apply_status_patch(&existing, &request, Utc::now());

        assert_eq!(patch.status, "pending");
        assert_eq!(patch.paid_amount, 0.0);
        assert_eq!(patch.balance, existing.price);
    }

    #[test]
    fn test_status_patch_non_pending_leaves_balance() {
        let existing = sample_shipment();
        let request = StatusPatchRequest {
            status: Some("delayed".to_string()),
            ..Default::default()
        };

        let patch = apply_status_patch(&existing, &request, Utc::now());

        assert_eq!(patch.paid_amount, 4000.0);
        assert_eq!(patch.balance, 6000.0);
    }

    #[test]
    fn test_status_patch_delivered_sets_timestamp_once() {
        let existing = sample_shipment();
        let now = Utc.with_ymd_and_hms(2026, 8, 2, 12, 0, 0).unwrap();

        let request = StatusPatchRequest {
            location: Some("delivery".to_string()),
            delivery_status: Some("delivered".to_string()),
            ..Default::default()
        };

        let patch = apply_status_patch(&existing, &request, now);
        assert_eq!(patch.delivered_at, Some(now));

        // Un segundo patch no pisa el timestamp original
        let mut delivered = existing.clone();
        delivered.delivered_at = Some(now);
        let later = Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).unwrap();
        let patch = apply_status_patch(&delivered, &request, later);
        assert_eq!(patch.delivered_at, Some(now));
    }

    #[test]
    fn test_status_patch_cancel_clears_delivered_at() {
        let mut existing = sample_shipment();
        existing.delivered_at = Some(Utc::now());

        let request = StatusPatchRequest {
            delivery_status: Some("canceled".to_string()),
            ..Default::default()
        };

        let patch = apply_status_patch(&existing, &request, Utc::now());
        assert_eq!(patch.delivered_at, None);
    }
}
