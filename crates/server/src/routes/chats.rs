use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use wabridge_shared::validation;

use crate::bridge;
use crate::error::AppError;
use crate::middleware::Ready;
use crate::models::{Chat, MarkReadRequest, SuccessResponse};
use crate::sync;
use crate::AppState;

use super::delegate;

/// GET /api/chats
pub async fn list_chats(State(state): State<Arc<AppState>>, _ready: Ready) -> Json<Vec<Chat>> {
    Json(sync::list_chats(&state.store).await)
}

/// POST /api/mark-read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
    body: Result<Json<MarkReadRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(body) = body?;
    let chat_id = body.chat_id.unwrap_or_default();
    mark_read_inner(&state, &chat_id).await
}

/// POST /api/mark-read/:chatId
pub async fn mark_read_path(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
    Path(chat_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    mark_read_inner(&state, &chat_id).await
}

async fn mark_read_inner(state: &AppState, chat_id: &str) -> Result<Json<SuccessResponse>, AppError> {
    validation::validate_chat_id(chat_id).map_err(AppError::Validation)?;

    delegate(state, state.backend.send_seen(chat_id)).await?;
    if sync::mark_chat_read(&state.store, chat_id).await? {
        bridge::publish_chats(state).await;
    } else {
        tracing::debug!("mark-read for unknown chat {}", chat_id);
    }

    Ok(Json(SuccessResponse::ok()))
}
