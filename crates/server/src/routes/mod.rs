pub mod chats;
pub mod data;
pub mod messages;
pub mod session;

use crate::backend::BackendError;
use crate::error::AppError;
use crate::ws;
use crate::AppState;
use axum::{routing::{get, post}, Router};
use std::future::Future;
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Session
        .route("/status", get(session::get_status))
        .route("/logout", post(session::logout))
        // Chats
        .route("/chats", get(chats::list_chats))
        .route("/mark-read", post(chats::mark_read))
        .route("/mark-read/{chatId}", post(chats::mark_read_path))
        // Messages
        .route("/messages", get(messages::list_messages))
        .route("/messages/{chatId}", get(messages::chat_history))
        .route("/send-message", post(messages::send_message))
        .route("/receive-message", post(messages::receive_message))
        .route("/search", get(messages::search_messages))
        // Data
        .route("/clear-data", post(data::clear_data))
        .route("/init-demo-data", post(data::init_demo_data));

    Router::new()
        .nest("/api", api_routes)
        .route("/gateway", get(ws::handler::ws_handler))
        .with_state(state)
}

/// Runs a backend call under the configured timeout.
pub(crate) async fn delegate<T>(
    state: &AppState,
    call: impl Future<Output = Result<T, BackendError>>,
) -> Result<T, AppError> {
    let limit = state.config.backend_timeout();
    match tokio::time::timeout(limit, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(BackendError::Timeout(limit).into()),
    }
}
