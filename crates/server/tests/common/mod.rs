#![allow(dead_code)]

pub mod ws_helpers;

use async_trait::async_trait;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use wabridge_server::backend::{self, BackendError, ChatBackend, Delivery, EventSender, FileBackend};
use wabridge_server::config::Config;
use wabridge_server::models::{Ack, ClientInfo, Message};
use wabridge_server::store::Store;
use wabridge_server::{bridge, routes, AppState};

/// Config pointing at a throwaway data directory.
pub fn test_config(dir: &TempDir) -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        data_dir: dir.path().to_path_buf(),
        backend_timeout_secs: 1,
        ..Config::default()
    }
}

pub async fn setup_test_store() -> (Arc<Store>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::open(dir.path()).await.expect("Failed to open store");
    (Arc::new(store), dir)
}

pub fn client_info() -> ClientInfo {
    ClientInfo {
        pushname: "Tester".into(),
        wid: "test_user".into(),
        platform: "test".into(),
    }
}

/// State backed by the flat-file backend, not yet ready.
pub async fn create_unready_state() -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(Store::open(dir.path()).await.expect("Failed to open store"));
    let backend: Arc<dyn ChatBackend> = Arc::new(FileBackend::new(store.clone()));
    let state = Arc::new(AppState::new(test_config(&dir), store, backend));
    (state, dir)
}

/// State backed by the flat-file backend with the session marked ready.
pub async fn create_test_state() -> (Arc<AppState>, TempDir) {
    let (state, dir) = create_unready_state().await;
    mark_ready(&state).await;
    (state, dir)
}

/// Flat-file state driven through the real event loop, as `main` wires it.
pub async fn create_running_state() -> (Arc<AppState>, TempDir) {
    let (state, dir) = create_unready_state().await;
    let (events_tx, events_rx) = backend::event_channel();
    tokio::spawn(bridge::run(state.clone(), events_rx, state.shutdown.clone()));
    state.backend.initialize(events_tx).await.unwrap();
    wait_until_ready(&state, true).await;
    (state, dir)
}

pub async fn wait_until_ready(state: &AppState, ready: bool) {
    for _ in 0..100 {
        if state.session.read().await.is_ready == ready {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session never reached is_ready={}", ready);
}

/// Ready state whose backend is the given stub.
pub async fn create_stub_state(backend: Arc<StubBackend>) -> (Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Arc::new(Store::open(dir.path()).await.expect("Failed to open store"));
    let state = Arc::new(AppState::new(test_config(&dir), store, backend));
    mark_ready(&state).await;
    (state, dir)
}

pub async fn mark_ready(state: &AppState) {
    state.session.write().await.on_ready(client_info());
}

pub fn create_test_app(state: Arc<AppState>) -> Router {
    routes::build_router(state)
}

pub fn inbound(id: &str, chat_id: &str, body: &str, ts: i64) -> Message {
    let mut m = Message::text(id.into(), chat_id, body, false, Ack::Pending, ts);
    m.sender_name = Some("Bob".into());
    m
}

pub fn outbound(id: &str, chat_id: &str, body: &str, ts: i64) -> Message {
    Message::text(id.into(), chat_id, body, true, Ack::Sent, ts)
}

/// Scriptable backend that records every delegated call.
#[derive(Default)]
pub struct StubBackend {
    pub calls: Mutex<Vec<String>>,
    pub history: Mutex<Vec<Message>>,
    pub sent_id: Option<String>,
    pub fail: bool,
    pub delay: Option<Duration>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn with_history(history: Vec<Message>) -> Self {
        Self {
            history: Mutex::new(history),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn call(&self, name: String) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(name);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(BackendError::Failed("stub failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    fn kind(&self) -> &'static str {
        "stub"
    }

    async fn initialize(&self, _events: EventSender) -> Result<(), BackendError> {
        self.call("initialize".into()).await
    }

    async fn send_message(&self, chat_id: &str, body: &str) -> Result<Delivery, BackendError> {
        self.call(format!("send_message:{}:{}", chat_id, body)).await?;
        Ok(Delivery {
            id: self.sent_id.clone(),
            ack: Ack::Sent,
        })
    }

    async fn send_seen(&self, chat_id: &str) -> Result<(), BackendError> {
        self.call(format!("send_seen:{}", chat_id)).await
    }

    async fn search_messages(&self, query: &str, _limit: usize) -> Result<Vec<Message>, BackendError> {
        self.call(format!("search:{}", query)).await?;
        Ok(Vec::new())
    }

    async fn fetch_messages(&self, chat_id: &str, _limit: usize) -> Result<Vec<Message>, BackendError> {
        self.call(format!("fetch_messages:{}", chat_id)).await?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn logout(&self) -> Result<(), BackendError> {
        self.call("logout".into()).await
    }
}
