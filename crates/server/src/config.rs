use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Flat-file JSON store, always ready once initialized.
    File,
}

impl BackendKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" | "mock" => Some(Self::File),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub backend: BackendKind,
    pub ws_queue_capacity: usize,
    pub history_limit: usize,
    pub search_limit: usize,
    pub backend_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            backend: BackendKind::File,
            ws_queue_capacity: 256,
            history_limit: 50,
            search_limit: 50,
            backend_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let backend = match env::var("BACKEND") {
            Ok(v) => BackendKind::parse(&v).unwrap_or_else(|| {
                tracing::warn!("Unknown BACKEND {:?}, falling back to file", v);
                BackendKind::File
            }),
            Err(_) => defaults.backend,
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            backend,
            ws_queue_capacity: parse_var::<usize>("WS_QUEUE_CAPACITY")
                .filter(|c| *c > 0)
                .unwrap_or(defaults.ws_queue_capacity),
            history_limit: parse_var("HISTORY_LIMIT").unwrap_or(defaults.history_limit),
            search_limit: parse_var("SEARCH_LIMIT").unwrap_or(defaults.search_limit),
            backend_timeout_secs: parse_var("BACKEND_TIMEOUT_SECS")
                .unwrap_or(defaults.backend_timeout_secs),
        }
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
