//! The single subscriber to the backend's event stream.
//!
//! Session transitions, reconciliation and fan-out for every backend event
//! happen here, in arrival order.

use tokio_util::sync::CancellationToken;

use crate::backend::{BackendEvent, EventReceiver};
use crate::models::Message;
use crate::sync;
use crate::ws::events::ServerEvent;
use crate::AppState;

pub async fn run(state: std::sync::Arc<AppState>, mut events: EventReceiver, shutdown: CancellationToken) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            event = events.recv() => match event {
                Some(event) => handle_event(&state, event).await,
                None => {
                    tracing::debug!("Backend event stream closed");
                    break;
                }
            },
        }
    }
    tracing::info!("Backend event loop stopped");
}

pub async fn handle_event(state: &AppState, event: BackendEvent) {
    match event {
        BackendEvent::QrReceived(qr) => {
            tracing::info!("QR code received");
            state.session.write().await.on_qr(qr.clone());
            state.gateway.broadcast_all(&ServerEvent::Qr { qr }, None).await;
            publish_status(state).await;
        }
        BackendEvent::Authenticated => {
            tracing::info!("Backend authenticated");
            state.session.write().await.on_authenticated();
            state.gateway.broadcast_all(&ServerEvent::Authenticated, None).await;
            publish_status(state).await;
        }
        BackendEvent::Ready(client_info) => {
            tracing::info!("Backend ready as {} ({})", client_info.pushname, client_info.wid);
            state.session.write().await.on_ready(client_info.clone());
            state
                .gateway
                .broadcast_all(&ServerEvent::Ready { client_info }, None)
                .await;
            publish_status(state).await;
            publish_chats(state).await;
        }
        BackendEvent::MessageReceived(message) => {
            let open = state.gateway.is_chat_open(&message.chat_id).await;
            match sync::ingest(&state.store, message, open).await {
                Ok(Some(message)) => publish_message(state, message).await,
                Ok(None) => tracing::debug!("Skipping already known message"),
                Err(e) => tracing::error!("Failed to ingest message: {}", e),
            }
        }
        BackendEvent::AckUpdated { id, ack } => match sync::update_ack(&state.store, &id, ack).await {
            Ok(Some(message)) => {
                state
                    .gateway
                    .broadcast_all(
                        &ServerEvent::MessageAck {
                            id: message.id,
                            ack: message.ack,
                        },
                        None,
                    )
                    .await;
            }
            Ok(None) => tracing::debug!("Ack {:?} for {} did not advance", ack, id),
            Err(e) => tracing::error!("Failed to update ack for {}: {}", id, e),
        },
        BackendEvent::Disconnected(reason) => {
            tracing::warn!("Backend disconnected: {}", reason);
            state.session.write().await.on_disconnected();
            state
                .gateway
                .broadcast_all(&ServerEvent::Disconnected { reason }, None)
                .await;
            publish_status(state).await;
        }
    }
}

/// Pushes a new message followed by the chat list it changed.
pub async fn publish_message(state: &AppState, message: Message) {
    state
        .gateway
        .broadcast_all(&ServerEvent::Message { message }, None)
        .await;
    publish_chats(state).await;
}

pub async fn publish_chats(state: &AppState) {
    let chats = sync::list_chats(&state.store).await;
    state
        .gateway
        .broadcast_all(&ServerEvent::Chats { chats }, None)
        .await;
}

pub async fn publish_status(state: &AppState) {
    let status = {
        let session = state.session.read().await;
        ServerEvent::status(&session)
    };
    state.gateway.broadcast_all(&status, None).await;
}
