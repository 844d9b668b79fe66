//! Controller de envíos

use crate::config::EnvironmentConfig;
use crate::dto::shipment_dto::{
    CreateShipmentRequest, ListMeta, ListShipmentsQuery, ShipmentListResponse, StatusPatchRequest,
    UpdateShipmentRequest,
};
use crate::dto::stats_dto::StatsSummaryResponse;
use crate::models::shipment::{Shipment, LOCATION_WAREHOUSE, STATUS_PENDING};
use crate::repositories::shipment_repository::{NewShipment, ShipmentFilters, ShipmentRepository};
use crate::services::delivery_gate::DeliveryGate;
use crate::services::pin_service::PinService;
use crate::services::shipment_lifecycle::{
    apply_status_patch, compute_balance, derive_delivery_status, is_delivery_location, merge_update,
};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{validate_date, validate_non_negative, validate_not_empty};
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 200;

pub struct ShipmentController {
    repository: ShipmentRepository,
    pins: PinService,
}

impl ShipmentController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: ShipmentRepository::new(pool.clone()),
            pins: PinService::new(pool, config.pin_secret.clone()),
        }
    }

    pub async fn create(&self, request: CreateShipmentRequest) -> AppResult<Shipment> {
        let mut errors = validator::ValidationErrors::new();
        if let Err(e) = validate_not_empty(&request.barcode) {
            errors.add("barcode", e);
        }
        if let Err(e) = validate_non_negative(request.weight.unwrap_or(0.0)) {
            errors.add("weight", e);
        }
        if let Err(e) = validate_non_negative(request.price.unwrap_or(0.0)) {
            errors.add("price", e);
        }
        if let Err(e) = validate_non_negative(request.paid_amount.unwrap_or(0.0)) {
            errors.add("paid_amount", e);
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let arrival_date = parse_arrival_date(request.arrival_date.as_deref())?
            .unwrap_or_else(|| Utc::now().date_naive());

        let price = request.price.unwrap_or(0.0);
        let paid_amount = request.paid_amount.unwrap_or(0.0);
        let location = request
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| LOCATION_WAREHOUSE.to_string())
            .to_lowercase();
        let delivery_status =
            derive_delivery_status(&location, request.delivery_status.as_deref());

        let created = self
            .repository
            .create(NewShipment {
                barcode: request.barcode.trim().to_string(),
                phone: request.phone.trim().to_string(),
                customer_name: request.customer_name.trim().to_string(),
                quantity: request.quantity.filter(|q| *q > 0).unwrap_or(1),
                weight: request.weight.unwrap_or(0.0),
                price,
                paid_amount,
                balance: compute_balance(price, paid_amount),
                status: request
                    .status
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| STATUS_PENDING.to_string()),
                delivery_status,
                location,
                arrival_date,
                notes: request.notes,
                delivery_note: request.delivery_note,
                courier: request.courier,
            })
            .await?;

        tracing::info!("Envío registrado: id={} barcode={}", created.id, created.barcode);
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> AppResult<Shipment> {
        let mut shipment = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Shipment", &id.to_string()))?;

        self.pins.attach_to(&mut shipment).await?;
        Ok(shipment)
    }

    pub async fn list(&self, query: ListShipmentsQuery) -> AppResult<ShipmentListResponse> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let filters = ShipmentFilters {
            phone: query.phone.filter(|v| !v.is_empty()),
            barcode: query.barcode.filter(|v| !v.is_empty()),
            status: query.status.filter(|v| !v.is_empty()),
            location: query.location.filter(|v| !v.is_empty()),
            date_from: parse_arrival_date(query.date_from.as_deref())?,
            date_to: parse_arrival_date(query.date_to.as_deref())?,
            search: query.search.filter(|v| !v.is_empty()),
            page,
            limit,
        };

        let (mut shipments, total) = self.repository.list(&filters).await?;

        for shipment in &mut shipments {
            self.pins.attach_to(shipment).await?;
        }

        Ok(ShipmentListResponse {
            data: shipments,
            meta: ListMeta { page, limit, total },
        })
    }

    /// Actualización completa (PUT). Si el merge resultante mueve el envío
    /// a entrega, el gate de PIN corre antes de cualquier persistencia: un
    /// rechazo aborta el update entero.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateShipmentRequest,
        header_bypass: bool,
    ) -> AppResult<Shipment> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Shipment", &id.to_string()))?;

        let arrival_date = parse_arrival_date(request.arrival_date.as_deref())?;
        let merged = merge_update(&existing, &request, arrival_date);

        if is_delivery_location(&merged.location) {
            let skip_pin = request.admin || request.admin_bypass || header_bypass;
            let pin_input = request.pin.as_deref().unwrap_or("").trim();
            DeliveryGate::new(&self.pins)
                .authorize(&merged.phone, pin_input, skip_pin)
                .await?;
        }

        let mut updated = self.repository.update(id, &merged).await?;
        self.pins.attach_to(&mut updated).await?;

        tracing::info!(
            "Envío actualizado: id={} location={} delivery_status={}",
            updated.id,
            updated.location,
            updated.delivery_status
        );
        Ok(updated)
    }

    /// Patch ligero de estado. Fast-path para llamadores internos de
    /// confianza: no corre el gate de PIN.
    pub async fn patch_status(
        &self,
        id: i64,
        request: StatusPatchRequest,
    ) -> AppResult<Shipment> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Shipment", &id.to_string()))?;

        let patch = apply_status_patch(&existing, &request, Utc::now());
        let mut updated = self.repository.patch_status(id, patch).await?;
        self.pins.attach_to(&mut updated).await?;

        Ok(updated)
    }

    pub async fn stats_summary(&self) -> AppResult<StatsSummaryResponse> {
        let (total_shipments, total_price, total_balance, by_status) =
            self.repository.stats_summary().await?;

        Ok(StatsSummaryResponse {
            total_shipments,
            total_price,
            total_balance,
            by_status,
        })
    }
}

fn parse_arrival_date(value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => {
            let date = validate_date(v).map_err(|e| {
                let mut errors = validator::ValidationErrors::new();
                errors.add("arrival_date", e);
                AppError::Validation(errors)
            })?;
            Ok(Some(date))
        }
    }
}
