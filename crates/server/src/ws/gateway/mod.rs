mod broadcast;

use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};

pub type ClientId = u64;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

pub struct ConnectedClient {
    pub tx: mpsc::Sender<String>,
    pub open_chat: Option<String>,
    pub connected_at: i64,
}

/// Connected UI sessions, each with its own bounded outbound queue.
pub struct GatewayState {
    next_id: RwLock<u64>,
    queue_capacity: usize,
    pub clients: RwLock<HashMap<ClientId, ConnectedClient>>,
}

impl Default for GatewayState {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl GatewayState {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            next_id: RwLock::new(1),
            queue_capacity: queue_capacity.max(1),
            clients: RwLock::new(HashMap::new()),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub async fn next_client_id(&self) -> ClientId {
        let mut id = self.next_id.write().await;
        let current = *id;
        *id += 1;
        current
    }

    pub async fn register(&self, client_id: ClientId, tx: mpsc::Sender<String>) {
        let client = ConnectedClient {
            tx,
            open_chat: None,
            connected_at: chrono::Utc::now().timestamp(),
        };
        self.clients.write().await.insert(client_id, client);
    }

    pub async fn unregister(&self, client_id: ClientId) -> Option<ConnectedClient> {
        self.clients.write().await.remove(&client_id)
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn open_chat(&self, client_id: ClientId, chat_id: &str) {
        if let Some(client) = self.clients.write().await.get_mut(&client_id) {
            client.open_chat = Some(chat_id.to_string());
        }
    }

    pub async fn close_chat(&self, client_id: ClientId) {
        if let Some(client) = self.clients.write().await.get_mut(&client_id) {
            client.open_chat = None;
        }
    }

    /// Whether any connected session currently has `chat_id` open.
    pub async fn is_chat_open(&self, chat_id: &str) -> bool {
        self.clients
            .read()
            .await
            .values()
            .any(|c| c.open_chat.as_deref() == Some(chat_id))
    }
}
