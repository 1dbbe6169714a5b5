use tokio::sync::mpsc;

use crate::AppState;
use crate::ws::events::ServerEvent;
use crate::ws::gateway::ClientId;

/// Late joiners get the current session snapshot and nothing older.
/// Must run before the session is registered with the gateway.
pub async fn send_initial_state(state: &AppState, tx: &mpsc::Sender<String>) {
    let status = {
        let session = state.session.read().await;
        ServerEvent::status(&session)
    };
    match serde_json::to_string(&status) {
        Ok(msg) => {
            // Fresh queue, capacity >= 1.
            let _ = tx.try_send(msg);
        }
        Err(e) => tracing::error!("Failed to serialize status snapshot: {:?}", e),
    }
}

pub async fn handle_disconnect(state: &AppState, client_id: ClientId) {
    match state.gateway.unregister(client_id).await {
        Some(client) => {
            let secs = chrono::Utc::now().timestamp() - client.connected_at;
            tracing::info!("Gateway client {} disconnected after {}s", client_id, secs);
        }
        None => tracing::info!("Gateway client {} dropped", client_id),
    }
}
