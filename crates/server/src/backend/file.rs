use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{BackendError, BackendEvent, ChatBackend, Delivery, EventSender};
use crate::models::{ClientInfo, Message};
use crate::store::Store;
use crate::sync;

/// Backend that keeps everything in the local JSON store.
pub struct FileBackend {
    store: Arc<Store>,
    client_info: ClientInfo,
    events: RwLock<Option<EventSender>>,
}

impl FileBackend {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            client_info: ClientInfo {
                pushname: "WhatsApp Web (Rust)".into(),
                wid: "demo_user".into(),
                platform: "flat-file".into(),
            },
            events: RwLock::new(None),
        }
    }

    async fn announce_ready(&self) -> Result<(), BackendError> {
        let Some(events) = self.events.read().await.clone() else {
            return Ok(());
        };
        events
            .send(BackendEvent::Ready(self.client_info.clone()))
            .await
            .map_err(|_| BackendError::Unavailable("event stream closed".into()))
    }
}

#[async_trait]
impl ChatBackend for FileBackend {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn initialize(&self, events: EventSender) -> Result<(), BackendError> {
        *self.events.write().await = Some(events);
        self.announce_ready().await
    }

    async fn send_message(&self, _chat_id: &str, _body: &str) -> Result<Delivery, BackendError> {
        Ok(Delivery::local())
    }

    async fn send_seen(&self, _chat_id: &str) -> Result<(), BackendError> {
        Ok(())
    }

    async fn search_messages(&self, query: &str, limit: usize) -> Result<Vec<Message>, BackendError> {
        Ok(sync::search(&self.store, query, limit).await)
    }

    async fn fetch_messages(&self, _chat_id: &str, _limit: usize) -> Result<Vec<Message>, BackendError> {
        // The store already is the history.
        Ok(Vec::new())
    }

    /// There is no remote session to end, so the backend is ready again
    /// right away.
    async fn logout(&self) -> Result<(), BackendError> {
        self.announce_ready().await
    }
}
