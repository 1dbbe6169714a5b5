use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use wabridge_shared::validation;

use crate::bridge;
use crate::error::AppError;
use crate::middleware::Ready;
use crate::models::{Message, MessageResponse, ReceiveMessageRequest, SendMessageRequest};
use crate::sync::{self, Inbound};
use crate::AppState;

use super::delegate;

#[derive(Deserialize)]
pub struct MessagesQuery {
    #[serde(rename = "chatId")]
    pub chat_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /api/messages?chatId=
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    ready: Ready,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let chat_id = query
        .chat_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("chatId parameter is required".into()))?;
    chat_history(State(state), ready, Path(chat_id)).await
}

/// GET /api/messages/:chatId
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    validation::validate_chat_id(&chat_id).map_err(AppError::Validation)?;

    let limit = state.config.history_limit;
    if limit > 0 {
        let fetched = delegate(&state, state.backend.fetch_messages(&chat_id, limit)).await?;
        let added = sync::import_history(&state.store, &chat_id, fetched).await?;
        if added > 0 {
            tracing::debug!("Imported {} history messages for {}", added, chat_id);
        }
    }

    Ok(Json(sync::list_messages(&state.store, &chat_id).await))
}

/// POST /api/send-message
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = body?;
    let chat_id = body.chat_id.unwrap_or_default();
    let text = body.message.unwrap_or_default();
    validation::validate_send_request(&chat_id, &text).map_err(AppError::Validation)?;

    let delivery = delegate(&state, state.backend.send_message(&chat_id, &text)).await?;
    let message = sync::record_outbound(&state.store, &chat_id, &text, delivery).await?;
    tracing::info!("Sent message {} to {}", message.id, chat_id);

    bridge::publish_message(&state, message.clone()).await;
    Ok(Json(MessageResponse {
        success: true,
        message_id: message.id.clone(),
        message,
    }))
}

/// POST /api/receive-message
pub async fn receive_message(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
    body: Result<Json<ReceiveMessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = body?;
    let chat_id = body.chat_id.unwrap_or_default();
    let text = body.message.unwrap_or_default();

    let open = state.gateway.is_chat_open(&chat_id).await;
    let message = sync::record_inbound(
        &state.store,
        Inbound {
            chat_id: &chat_id,
            body: &text,
            sender_name: body.sender_name.as_deref(),
            from: body.from.as_deref(),
        },
        open,
    )
    .await?;
    tracing::info!("Received message {} in {}", message.id, chat_id);

    bridge::publish_message(&state, message.clone()).await;
    Ok(Json(MessageResponse {
        success: true,
        message_id: message.id.clone(),
        message,
    }))
}

/// GET /api/search?query=
pub async fn search_messages(
    State(state): State<Arc<AppState>>,
    _ready: Ready,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let q = query.query.unwrap_or_default();
    validation::validate_search_query(&q).map_err(AppError::Validation)?;

    let hits = delegate(
        &state,
        state.backend.search_messages(q.trim(), state.config.search_limit),
    )
    .await?;
    Ok(Json(hits))
}
