mod lifecycle;

use axum::{
    body::Bytes,
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use wabridge_shared::constants::WS_HEARTBEAT_INTERVAL_MS;

use crate::AppState;
use crate::ws::events::{ClientEvent, ServerEvent};
use crate::ws::gateway::ClientId;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client_id = state.gateway.next_client_id().await;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut rx) = mpsc::channel::<String>(state.gateway.queue_capacity());
    // Snapshot goes in ahead of any broadcast the gateway can deliver.
    lifecycle::send_initial_state(&state, &tx).await;
    state.gateway.register(client_id, tx).await;
    tracing::info!("Gateway client {} connected", client_id);

    // Forward queued events to the socket; ends when the gateway drops us.
    let shutdown = state.shutdown.clone();
    let mut send_task = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(Duration::from_millis(WS_HEARTBEAT_INTERVAL_MS));
        heartbeat.tick().await;
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                        return;
                    }
                }
                _ = heartbeat.tick() => {
                    if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        return;
                    }
                }
                _ = shutdown.cancelled() => break,
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    });

    // Receive loop
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_rx.next().await {
            match msg {
                Message::Text(text) => {
                    let text_str: &str = &text;
                    match serde_json::from_str::<ClientEvent>(text_str) {
                        Ok(event) => handle_client_event(&state_clone, client_id, event).await,
                        Err(e) => tracing::debug!("Ignoring client event from {}: {}", client_id, e),
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    lifecycle::handle_disconnect(&state, client_id).await;
}

async fn handle_client_event(state: &AppState, client_id: ClientId, event: ClientEvent) {
    match event {
        ClientEvent::OpenChat { chat_id } => {
            state.gateway.open_chat(client_id, &chat_id).await;
        }
        ClientEvent::CloseChat => {
            state.gateway.close_chat(client_id).await;
        }
        ClientEvent::Ping => {
            state.gateway.send_to(client_id, &ServerEvent::Pong).await;
        }
    }
}
