//! Rutas de PINes de entrega

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};

use crate::controllers::pin_controller::PinController;
use crate::dto::pin_dto::{EnsurePinResponse, LookupPinResponse, PinRequest};
use crate::middleware::admin::{header_matches_secret, ADMIN_PIN_HEADER};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pin_router() -> Router<AppState> {
    Router::new()
        .route("/ensure", post(ensure_pin))
        .route("/lookup", post(lookup_pin))
}

async fn ensure_pin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PinRequest>,
) -> Result<Json<EnsurePinResponse>, AppError> {
    let admin_header = header_matches_secret(&headers, ADMIN_PIN_HEADER, &state.config);
    let controller = PinController::new(state.pool.clone(), &state.config);
    let response = controller.ensure(request, admin_header).await?;
    Ok(Json(response))
}

async fn lookup_pin(
    State(state): State<AppState>,
    Json(request): Json<PinRequest>,
) -> Result<Json<LookupPinResponse>, AppError> {
    let controller = PinController::new(state.pool.clone(), &state.config);
    let response = controller.lookup(request).await?;
    Ok(Json(response))
}
