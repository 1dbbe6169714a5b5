use axum::{extract::State, Json};
use std::sync::Arc;

use crate::bridge;
use crate::error::AppError;
use crate::middleware::Ready;
use crate::models::{StatusResponse, SuccessResponse};
use crate::AppState;

use super::delegate;

/// GET /api/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(state.session.read().await.status())
}

/// POST /api/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
) -> Result<Json<SuccessResponse>, AppError> {
    state.session.write().await.logout();
    tracing::info!("Logged out of backend session");
    bridge::publish_status(&state).await;

    // Backends that re-initialize report it through the event stream.
    delegate(&state, state.backend.logout()).await?;
    Ok(Json(SuccessResponse::ok()))
}
