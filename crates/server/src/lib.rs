pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
pub mod sync;
pub mod ws;

use config::Config;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use backend::ChatBackend;
use models::SessionState;
use store::Store;

pub struct AppState {
    pub config: Config,
    pub store: Arc<Store>,
    pub backend: Arc<dyn ChatBackend>,
    pub session: RwLock<SessionState>,
    pub gateway: Arc<ws::gateway::GatewayState>,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Config, store: Arc<Store>, backend: Arc<dyn ChatBackend>) -> Self {
        let gateway = Arc::new(ws::gateway::GatewayState::new(config.ws_queue_capacity));
        Self {
            config,
            store,
            backend,
            session: RwLock::new(SessionState::new()),
            gateway,
            shutdown: CancellationToken::new(),
        }
    }
}
