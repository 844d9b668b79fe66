//! Rutas de contenido del sitio

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::content_controller::ContentController;
use crate::dto::stats_dto::ContentSections;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_content_router() -> Router<AppState> {
    Router::new().route("/", get(get_content).put(put_content))
}

async fn get_content(State(state): State<AppState>) -> Result<Json<ContentSections>, AppError> {
    let controller = ContentController::new(state.pool.clone());
    let response = controller.get().await?;
    Ok(Json(response))
}

async fn put_content(
    State(state): State<AppState>,
    Json(request): Json<ContentSections>,
) -> Result<Json<ContentSections>, AppError> {
    let controller = ContentController::new(state.pool.clone());
    let response = controller.put(request).await?;
    Ok(Json(response))
}
