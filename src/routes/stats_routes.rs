//! Rutas de estadísticas

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::shipment_controller::ShipmentController;
use crate::dto::stats_dto::StatsSummaryResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stats_router() -> Router<AppState> {
    Router::new().route("/summary", get(stats_summary))
}

async fn stats_summary(
    State(state): State<AppState>,
) -> Result<Json<StatsSummaryResponse>, AppError> {
    let controller = ShipmentController::new(state.pool.clone(), &state.config);
    let response = controller.stats_summary().await?;
    Ok(Json(response))
}
