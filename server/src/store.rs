//! Flat-file persistence for the todo collection.
//!
//! # Design
//! The file is the only source of truth between requests: handlers load a
//! fresh snapshot, operate on it, and save it back in full. Reads fail open
//! (anything unreadable is an empty collection) while writes fail closed.
//!
//! Saves go to a uniquely named sibling file that is then renamed over the
//! target, so a reader never sees a half-written array. There is no locking:
//! two mutations racing on the same snapshot resolve as last writer wins.

use std::path::{Path, PathBuf};

use thiserror::Error;
use todo_core::Collection;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the JSON file backing the collection.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current collection. Missing or malformed files yield an empty
    /// collection.
    pub async fn load(&self) -> Collection {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "todos file unreadable, starting empty");
                return Collection::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(collection) => collection,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "todos file malformed, treating as empty");
                Collection::new()
            }
        }
    }

    /// Replace the stored collection with `collection`.
    pub async fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(collection)?;
        let tmp = self.temp_path();
        if let Err(err) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        tracing::debug!(path = %self.path.display(), todos = collection.len(), "todos saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "todos".to_string());
        self.path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
    }
}
