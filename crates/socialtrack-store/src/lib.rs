//! Persistence for the month record: one JSON snapshot on disk.
//!
//! The store owns the persistence lifecycle and nothing else. Loading
//! never fails: a missing or unreadable snapshot is treated as "no prior
//! state" and yields the pristine default. Saving writes the snapshot
//! atomically (temp file + rename) so a crash mid-write cannot corrupt
//! the previous state.

use std::path::{Path, PathBuf};

use thiserror::Error;

use socialtrack_core::month::MonthData;

/// Snapshot file name inside the data directory.
pub const SNAPSHOT_FILE: &str = "month.json";

/// Errors raised by snapshot writes. Reads never error; see
/// [`MonthStore::load`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write snapshot at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize month snapshot")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for the single live [`MonthData`] record.
#[derive(Debug, Clone)]
pub struct MonthStore {
    data_dir: PathBuf,
}

impl MonthStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Default data directory.
    ///
    /// Always uses XDG layout: `$XDG_DATA_HOME/socialtrack` or
    /// `~/.local/share/socialtrack`.
    pub fn default_data_dir() -> PathBuf {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("socialtrack");
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share")
            .join("socialtrack")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    /// Load the persisted month record.
    ///
    /// Returns the pristine default when no snapshot exists or the file
    /// fails to parse. A corrupt snapshot is logged at warn level and
    /// otherwise treated exactly like a missing one.
    pub fn load(&self) -> MonthData {
        let path = self.snapshot_path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return MonthData::pristine();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "snapshot unreadable, starting fresh");
                return MonthData::pristine();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(month) => month,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "snapshot corrupt, starting fresh");
                MonthData::pristine()
            }
        }
    }

    /// Persist the month record, replacing any previous snapshot.
    ///
    /// Idempotent: saving the same record twice leaves the same bytes.
    pub fn save(&self, month: &MonthData) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let contents = serde_json::to_string_pretty(month)?;

        // Write to a sibling temp file, then rename over the snapshot so
        // readers never observe a partial write.
        let path = self.snapshot_path();
        let tmp = self.data_dir.join(format!("{SNAPSHOT_FILE}.tmp"));
        std::fs::write(&tmp, &contents)
            .map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        std::fs::rename(&tmp, &path)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;

        tracing::debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Clear the persisted state and return the pristine default.
    pub fn reset(&self) -> Result<MonthData, StoreError> {
        let path = self.snapshot_path();
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::Io { path, source }),
        }
        Ok(MonthData::pristine())
    }
}
