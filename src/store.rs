//! Best-effort JSON cache for the generation history.
//!
//! The stand-in for the original UI's local storage: one JSON array at a
//! caller-chosen path, camelCase fields matching [`GenerationResult`]'s
//! serialized form. Both directions swallow I/O problems: a missing or
//! corrupt cache loads as an empty history, and a failed save is a warning
//! rather than an error.

use crate::GenerationResult;
use std::io;
use std::path::{Path, PathBuf};

/// History cache at a fixed path.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached history. Missing file ⇒ empty; malformed file ⇒
    /// warn and empty.
    pub async fn load(&self) -> Vec<GenerationResult> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to read history cache");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "discarding malformed history cache");
                Vec::new()
            }
        }
    }

    /// Write the history. Failures are logged and dropped.
    pub async fn save(&self, history: &[GenerationResult]) {
        if let Err(err) = self.try_save(history).await {
            tracing::warn!(path = %self.path.display(), %err, "failed to write history cache");
        }
    }

    async fn try_save(&self, history: &[GenerationResult]) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(history)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, json).await
    }
}
