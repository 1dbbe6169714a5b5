use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::StoreError;

/// An ordered sequence of records kept as one JSON array on disk.
///
/// Reads never fail: a missing file is an empty collection and a malformed
/// document degrades to empty as well. Writes replace the whole file through
/// a temp file + rename so a concurrent reader sees either the old or the new
/// document, never a partial one.
pub struct JsonCollection<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_all(&self) -> Vec<T> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice::<Vec<T>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed collection {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub async fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::io(parent, source))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| StoreError::io(&tmp, source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::io(&self.path, source))
    }
}
