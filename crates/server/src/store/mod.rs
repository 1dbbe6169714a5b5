mod collection;

pub use collection::JsonCollection;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::models::{Chat, Message};

pub const CHATS_FILE: &str = "chats.json";
pub const MESSAGES_FILE: &str = "messages.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The chat list and the message log, one JSON document each.
///
/// There is no cross-file transaction. Writers hold [`Store::write_lock`] for
/// the whole read-modify-write, writing the message log before the chat list.
pub struct Store {
    data_dir: PathBuf,
    pub chats: JsonCollection<Chat>,
    pub messages: JsonCollection<Message>,
    writer: Mutex<()>,
}

impl Store {
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|source| StoreError::io(&data_dir, source))?;

        tracing::info!("Store opened at {}", data_dir.display());

        Ok(Self {
            chats: JsonCollection::new(data_dir.join(CHATS_FILE)),
            messages: JsonCollection::new(data_dir.join(MESSAGES_FILE)),
            data_dir,
            writer: Mutex::new(()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }
}
