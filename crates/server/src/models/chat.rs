use serde::{Deserialize, Serialize};

use super::{LastMessage, Message};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub last_message: Option<LastMessage>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

impl Chat {
    /// A chat implied by its first message.
    pub fn from_message(message: &Message, name: &str, unread_count: u32) -> Self {
        Self {
            id: message.chat_id.clone(),
            name: name.to_string(),
            is_group: false,
            unread_count,
            timestamp: message.timestamp,
            last_message: Some(message.snapshot()),
            profile_pic_url: None,
        }
    }

    /// Moves the cached last message forward if `message` is at least as new.
    /// Returns whether the cache changed.
    pub fn advance(&mut self, message: &Message) -> bool {
        let newer = self
            .last_message
            .as_ref()
            .map_or(true, |last| message.timestamp >= last.timestamp);
        if newer {
            self.last_message = Some(message.snapshot());
        }
        if message.timestamp > self.timestamp {
            self.timestamp = message.timestamp;
        }
        newer
    }
}
