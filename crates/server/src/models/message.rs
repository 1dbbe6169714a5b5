use serde::{Deserialize, Serialize};
use wabridge_shared::constants::{DEFAULT_MESSAGE_TYPE, MESSAGE_ID_PREFIX, MESSAGE_ID_SUFFIX_LEN};

/// Delivery state of a message. Serialized as its integer code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Ack {
    #[default]
    Pending = 0,
    Sent = 1,
    Delivered = 2,
    Read = 3,
}

impl From<i64> for Ack {
    // Codes outside 0..=3 (error/played in the live protocol) clamp to the nearest state.
    fn from(code: i64) -> Self {
        match code {
            i64::MIN..=0 => Ack::Pending,
            1 => Ack::Sent,
            2 => Ack::Delivered,
            _ => Ack::Read,
        }
    }
}

impl From<Ack> for i64 {
    fn from(ack: Ack) -> Self {
        ack as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub mimetype: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub ack: Ack,
    #[serde(rename = "type", default = "default_message_type")]
    pub kind: String,
    #[serde(default)]
    pub has_media: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

fn default_message_type() -> String {
    DEFAULT_MESSAGE_TYPE.to_string()
}

impl Message {
    /// A plain text message created by this bridge.
    pub fn text(id: String, chat_id: &str, body: &str, from_me: bool, ack: Ack, timestamp: i64) -> Self {
        Self {
            id,
            chat_id: chat_id.to_string(),
            body: Some(body.to_string()),
            from_me,
            timestamp,
            ack,
            kind: default_message_type(),
            has_media: false,
            media: None,
            sender_name: None,
            from: None,
        }
    }

    pub fn snapshot(&self) -> LastMessage {
        LastMessage {
            body: self.body.clone().unwrap_or_default(),
            timestamp: self.timestamp,
            from_me: self.from_me,
        }
    }
}

/// Denormalized copy of a chat's newest message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMessage {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub from_me: bool,
}

/// `msg_<epoch seconds>_<random suffix>`
pub fn generate_message_id(timestamp: i64) -> String {
    format!(
        "{}{}_{}",
        MESSAGE_ID_PREFIX,
        timestamp,
        nanoid::nanoid!(MESSAGE_ID_SUFFIX_LEN)
    )
}
