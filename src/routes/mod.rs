//! Rutas de la API

pub mod content_routes;
pub mod pin_routes;
pub mod shipment_routes;
pub mod stats_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/pins", pin_routes::create_pin_router())
        .nest("/shipments", shipment_routes::create_shipment_router())
        .nest("/stats", stats_routes::create_stats_router())
        .nest("/content", content_routes::create_content_router())
        .route("/health", get(health_check))
}

/// Sonda de conectividad contra el store
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(json!({ "ok": true })))
}
