pub const APP_NAME: &str = "wabridge";

// Limits
pub const MAX_MESSAGE_LENGTH: usize = 65_536;
pub const MAX_CHAT_ID_LENGTH: usize = 256;
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;

// Placeholder names for implicitly created chats
pub const UNKNOWN_CHAT_NAME: &str = "Unknown Chat";
pub const UNKNOWN_SENDER_NAME: &str = "Unknown";

// Message ids
pub const MESSAGE_ID_PREFIX: &str = "msg_";
pub const MESSAGE_ID_SUFFIX_LEN: usize = 12;

pub const DEFAULT_MESSAGE_TYPE: &str = "text";

// WebSocket
pub const WS_HEARTBEAT_INTERVAL_MS: u64 = 30_000;
