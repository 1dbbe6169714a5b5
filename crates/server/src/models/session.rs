use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub pushname: String,
    pub wid: String,
    pub platform: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Initializing,
    QrCode,
    Authenticated,
    Ready,
    Disconnected,
    LoggedOut,
}

impl SessionPhase {
    pub fn message(self) -> &'static str {
        match self {
            SessionPhase::Initializing => "Connecting to WhatsApp...",
            SessionPhase::QrCode => "Scan QR Code with WhatsApp",
            SessionPhase::Authenticated => "Authenticated successfully",
            SessionPhase::Ready => "WhatsApp is ready!",
            SessionPhase::Disconnected => "Disconnected from WhatsApp",
            SessionPhase::LoggedOut => "Logged out",
        }
    }
}

/// Process-wide view of the backend session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub is_ready: bool,
    pub qr_code: Option<String>,
    pub client_info: Option<ClientInfo>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Initializing,
            is_ready: false,
            qr_code: None,
            client_info: None,
        }
    }

    pub fn on_qr(&mut self, qr: String) {
        self.phase = SessionPhase::QrCode;
        self.is_ready = false;
        self.qr_code = Some(qr);
    }

    pub fn on_authenticated(&mut self) {
        self.phase = SessionPhase::Authenticated;
        self.qr_code = None;
    }

    pub fn on_ready(&mut self, info: ClientInfo) {
        self.phase = SessionPhase::Ready;
        self.is_ready = true;
        self.qr_code = None;
        self.client_info = Some(info);
    }

    pub fn on_disconnected(&mut self) {
        self.phase = SessionPhase::Disconnected;
        self.is_ready = false;
    }

    pub fn logout(&mut self) {
        self.phase = SessionPhase::LoggedOut;
        self.is_ready = false;
        self.qr_code = None;
        self.client_info = None;
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            is_ready: self.is_ready,
            qr_code: self.qr_code.clone(),
            client_info: self.client_info.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_ready: bool,
    pub qr_code: Option<String>,
    pub client_info: Option<ClientInfo>,
}
