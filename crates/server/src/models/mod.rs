mod chat;
mod message;
mod session;

pub use chat::*;
pub use message::*;
pub use session::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendMessageRequest {
    pub chat_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiveMessageRequest {
    pub chat_id: Option<String>,
    pub message: Option<String>,
    pub sender_name: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkReadRequest {
    pub chat_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message_id: String,
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Reply to bulk data operations (clear / demo seed).
#[derive(Debug, Serialize)]
pub struct DataResetResponse {
    pub success: bool,
    pub message: String,
    pub chats: usize,
    pub messages: usize,
}
