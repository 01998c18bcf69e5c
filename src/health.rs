use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    media_store: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Files directory is not writable")
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    if state.media_store.is_writable().await {
        info!("Health check passed");
        Ok(Json(HealthResponse {
            status: "OK".to_string(),
            media_store: "healthy".to_string(),
        }))
    } else {
        error!("Media store health check failed");
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
