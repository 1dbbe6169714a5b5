use serde::Serialize;

use crate::models::{Ack, Chat, ClientInfo, Message, SessionPhase, SessionState};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Qr {
        qr: String,
    },
    Authenticated,
    Ready {
        #[serde(rename = "clientInfo")]
        client_info: ClientInfo,
    },
    Chats {
        chats: Vec<Chat>,
    },
    Message {
        message: Message,
    },
    MessageAck {
        id: String,
        ack: Ack,
    },
    Status {
        status: SessionPhase,
        message: String,
        #[serde(rename = "isReady")]
        is_ready: bool,
        #[serde(rename = "qrCode")]
        qr_code: Option<String>,
        #[serde(rename = "clientInfo")]
        client_info: Option<ClientInfo>,
    },
    Disconnected {
        reason: String,
    },
    Pong,
}

impl ServerEvent {
    pub fn status(session: &SessionState) -> Self {
        ServerEvent::Status {
            status: session.phase,
            message: session.phase.message().to_string(),
            is_ready: session.is_ready,
            qr_code: session.qr_code.clone(),
            client_info: session.client_info.clone(),
        }
    }
}
