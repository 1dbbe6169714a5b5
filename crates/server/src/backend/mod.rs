mod file;

pub use file::FileBackend;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{Ack, ClientInfo, Message};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),

    #[error("Backend timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Everything a messaging backend can report to the bridge.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    QrReceived(String),
    Authenticated,
    Ready(ClientInfo),
    MessageReceived(Message),
    AckUpdated { id: String, ack: Ack },
    Disconnected(String),
}

pub type EventSender = mpsc::Sender<BackendEvent>;
pub type EventReceiver = mpsc::Receiver<BackendEvent>;

pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

/// Result of handing an outgoing message to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// Backend-assigned id; `None` lets the bridge generate one.
    pub id: Option<String>,
    pub ack: Ack,
}

impl Delivery {
    pub fn local() -> Self {
        Self {
            id: None,
            ack: Ack::Sent,
        }
    }
}

/// The messaging service behind the bridge.
///
/// Implementations push lifecycle and message events through the sender given
/// to [`ChatBackend::initialize`] and serve the request/response delegations.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn kind(&self) -> &'static str;

    async fn initialize(&self, events: EventSender) -> Result<(), BackendError>;

    async fn send_message(&self, chat_id: &str, body: &str) -> Result<Delivery, BackendError>;

    async fn send_seen(&self, chat_id: &str) -> Result<(), BackendError>;

    async fn search_messages(&self, query: &str, limit: usize) -> Result<Vec<Message>, BackendError>;

    /// Recent history for a chat, oldest first.
    async fn fetch_messages(&self, chat_id: &str, limit: usize) -> Result<Vec<Message>, BackendError>;

    async fn logout(&self) -> Result<(), BackendError>;
}
