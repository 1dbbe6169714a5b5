use tokio::sync::mpsc::error::TrySendError;

use super::{ClientId, GatewayState};
use crate::ws::events::ServerEvent;

impl GatewayState {
    /// Queues `event` for every session except `exclude` and returns how many
    /// accepted it. Never waits: a session whose queue is full or closed is
    /// dropped from the gateway, which ends its socket.
    pub async fn broadcast_all(&self, event: &ServerEvent, exclude: Option<ClientId>) -> usize {
        let msg = match serde_json::to_string(event) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Failed to serialize gateway event: {:?}", e);
                return 0;
            }
        };

        // Exclusive lock so every session sees broadcasts in the same order.
        let mut clients = self.clients.write().await;
        let mut delivered = 0;
        clients.retain(|&cid, client| {
            if Some(cid) == exclude {
                return true;
            }
            match client.tx.try_send(msg.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("Dropping gateway client {}: queue full", cid);
                    false
                }
                Err(TrySendError::Closed(_)) => false,
            }
        });
        delivered
    }

    pub async fn send_to(&self, client_id: ClientId, event: &ServerEvent) -> bool {
        let msg = match serde_json::to_string(event) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Failed to serialize gateway event: {:?}", e);
                return false;
            }
        };

        let mut clients = self.clients.write().await;
        let Some(client) = clients.get(&client_id) else {
            return false;
        };
        match client.tx.try_send(msg) {
            Ok(()) => true,
            Err(e) => {
                if matches!(e, TrySendError::Full(_)) {
                    tracing::warn!("Dropping gateway client {}: queue full", client_id);
                }
                clients.remove(&client_id);
                false
            }
        }
    }
}
