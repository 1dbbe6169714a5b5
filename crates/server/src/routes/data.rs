use axum::{extract::State, Json};
use std::sync::Arc;

use crate::bridge;
use crate::error::AppError;
use crate::middleware::Ready;
use crate::models::DataResetResponse;
use crate::sync;
use crate::AppState;

/// POST /api/clear-data
pub async fn clear_data(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
) -> Result<Json<DataResetResponse>, AppError> {
    sync::clear_all(&state.store).await?;
    tracing::info!("Cleared all chats and messages");

    bridge::publish_chats(&state).await;
    Ok(Json(DataResetResponse {
        success: true,
        message: "All data cleared successfully".into(),
        chats: 0,
        messages: 0,
    }))
}

/// POST /api/init-demo-data
pub async fn init_demo_data(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
) -> Result<Json<DataResetResponse>, AppError> {
    let (chats, messages) = sync::seed_demo(&state.store).await?;
    tracing::info!("Seeded {} demo chats with {} messages", chats, messages);

    bridge::publish_chats(&state).await;
    Ok(Json(DataResetResponse {
        success: true,
        message: "Demo data initialized".into(),
        chats,
        messages,
    }))
}
