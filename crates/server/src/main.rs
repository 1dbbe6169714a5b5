use axum::http::{HeaderName, Method};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use wabridge_shared::constants::APP_NAME;

use wabridge_server::backend::{self, ChatBackend, FileBackend};
use wabridge_server::config::{BackendKind, Config};
use wabridge_server::store::Store;
use wabridge_server::{bridge, routes, sync, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wabridge_server=info".into()),
        )
        .init();

    let config = Config::from_env();

    let store = Arc::new(
        Store::open(&config.data_dir)
            .await
            .expect("Failed to open data directory"),
    );

    // Heal a chat list left behind by a crash between the two writes
    if let Err(e) = sync::repair(&store).await {
        tracing::error!("Chat repair failed: {}", e);
    }

    let backend: Arc<dyn ChatBackend> = match config.backend {
        BackendKind::File => Arc::new(FileBackend::new(store.clone())),
    };

    let state = Arc::new(AppState::new(config.clone(), store, backend.clone()));
    let shutdown = state.shutdown.clone();

    let (events_tx, events_rx) = backend::event_channel();
    let bridge_task = tokio::spawn(bridge::run(state.clone(), events_rx, shutdown.clone()));

    if let Err(e) = backend.initialize(events_tx).await {
        tracing::error!("Backend initialization failed: {}", e);
    }

    // Build router
    let app = routes::build_router(state.clone()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([HeaderName::from_static("content-type")]),
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");

    tracing::info!("{} server running on {} ({} backend)", APP_NAME, addr, backend.kind());

    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            signal.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .expect("Server error");

    let _ = bridge_task.await;
}
