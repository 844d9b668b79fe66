//! Rutas de envíos

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
    Json, Router,
};

use crate::controllers::payment_controller::PaymentController;
use crate::controllers::shipment_controller::ShipmentController;
use crate::dto::payment_dto::{PaymentRecordedResponse, RecordPaymentRequest};
use crate::dto::shipment_dto::{
    CreateShipmentRequest, ListShipmentsQuery, ShipmentListResponse, StatusPatchRequest,
    UpdateShipmentRequest,
};
use crate::middleware::admin::{header_matches_secret, ADMIN_BYPASS_HEADER};
use crate::models::{Payment, Shipment};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_shipment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route("/:id", get(get_shipment).put(update_shipment))
        .route("/:id/status", patch(patch_shipment_status))
        .route("/:id/payments", get(list_payments).post(record_payment))
}

async fn list_shipments(
    State(state): State<AppState>,
    Query(query): Query<ListShipmentsQuery>,
) -> Result<Json<ShipmentListResponse>, AppError> {
    let controller = ShipmentController::new(state.pool.clone(), &state.config);
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Shipment>, AppError> {
    let controller = ShipmentController::new(state.pool.clone(), &state.config);
    let shipment = controller.get(id).await?;
    Ok(Json(shipment))
}

async fn create_shipment(
    State(state): State<AppState>,
    Json(request): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<Shipment>), AppError> {
    let controller = ShipmentController::new(state.pool.clone(), &state.config);
    let shipment = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateShipmentRequest>,
) -> Result<Json<Shipment>, AppError> {
    let header_bypass = header_matches_secret(&headers, ADMIN_BYPASS_HEADER, &state.config);
    let controller = ShipmentController::new(state.pool.clone(), &state.config);
    let shipment = controller.update(id, request, header_bypass).await?;
    Ok(Json(shipment))
}

async fn patch_shipment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusPatchRequest>,
) -> Result<Json<Shipment>, AppError> {
    let controller = ShipmentController::new(state.pool.clone(), &state.config);
    let shipment = controller.patch_status(id, request).await?;
    Ok(Json(shipment))
}

async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let controller = PaymentController::new(state.pool.clone(), &state.config);
    let payments = controller.list(id).await?;
    Ok(Json(payments))
}

async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentRecordedResponse>), AppError> {
    let controller = PaymentController::new(state.pool.clone(), &state.config);
    let response = controller.record(id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
