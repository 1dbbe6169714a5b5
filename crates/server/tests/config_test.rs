use std::time::Duration;
use wabridge_server::config::{BackendKind, Config};

#[test]
fn backend_kind_parses_known_names() {
    assert_eq!(BackendKind::parse("file"), Some(BackendKind::File));
    assert_eq!(BackendKind::parse(" MOCK "), Some(BackendKind::File));
    assert_eq!(BackendKind::parse("carrier-pigeon"), None);
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.data_dir, std::path::PathBuf::from("./data"));
    assert_eq!(config.ws_queue_capacity, 256);
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.search_limit, 50);
    assert_eq!(config.backend_timeout(), Duration::from_secs(30));
}
