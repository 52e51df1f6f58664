//! Checkpoint persistence
//!
//! The engine surfaces the last item's start time per page; this store
//! persists it between runs as the seed `startDateTime` for the next
//! extraction. The engine never reads or writes the checkpoint mid-stream.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serialized checkpoint contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Start time of the last fully processed item
    pub latest_timestamp: String,
    /// When this checkpoint was written
    pub saved_at: DateTime<Utc>,
}

/// File-backed checkpoint store
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the persisted timestamp, or the default when no checkpoint
    /// exists yet
    pub fn load_or(&self, default: &str) -> Result<String> {
        if !self.path.exists() {
            return Ok(default.to_string());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| Error::Checkpoint {
            message: format!("Failed to read checkpoint file: {e}"),
        })?;
        let checkpoint: Checkpoint =
            serde_json::from_str(&contents).map_err(|e| Error::Checkpoint {
                message: format!("Failed to parse checkpoint file: {e}"),
            })?;

        Ok(checkpoint.latest_timestamp)
    }

    /// Persist a timestamp.
    ///
    /// Writes to a temp file then renames, so a crash mid-write leaves the
    /// previous checkpoint intact.
    pub fn save(&self, timestamp: &str) -> Result<()> {
        let checkpoint = Checkpoint {
            latest_timestamp: timestamp.to_string(),
            saved_at: Utc::now(),
        };
        let contents =
            serde_json::to_string_pretty(&checkpoint).map_err(|e| Error::Checkpoint {
                message: format!("Failed to serialize checkpoint: {e}"),
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::Checkpoint {
                    message: format!("Failed to create checkpoint directory: {e}"),
                })?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &contents).map_err(|e| Error::Checkpoint {
            message: format!("Failed to write checkpoint file: {e}"),
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| Error::Checkpoint {
            message: format!("Failed to rename checkpoint file: {e}"),
        })?;

        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("latest_timestamp.json"));

        let ts = store.load_or("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(ts, "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("latest_timestamp.json"));

        store.save("2023-06-15T12:00:00Z").unwrap();
        let ts = store.load_or("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(ts, "2023-06-15T12:00:00Z");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("nested/dir/state.json"));

        store.save("2023-01-01T00:00:00Z").unwrap();
        assert_eq!(
            store.load_or("default").unwrap(),
            "2023-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_save_overwrites_previous() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("state.json"));

        store.save("2023-01-01T00:00:00Z").unwrap();
        store.save("2023-02-01T00:00:00Z").unwrap();
        assert_eq!(
            store.load_or("default").unwrap(),
            "2023-02-01T00:00:00Z"
        );
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = CheckpointStore::new(&path);
        assert!(store.load_or("default").is_err());
    }
}
