mod server_event;

pub use server_event::ServerEvent;

use serde::Deserialize;

// ── Client → Server Events ──

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// The session is now showing this chat; inbound messages to it do not
    /// count as unread.
    OpenChat {
        #[serde(rename = "chatId")]
        chat_id: String,
    },
    CloseChat,
    Ping,
}
