//! Durable local persistence for the standalone variant.
//!
//! The whole collection is serialized as one JSON array to a single file
//! named by the fixed storage key, under the platform data directory. On
//! load, timestamps re-hydrate into native dates via serde. Missing or
//! corrupted content yields an empty collection — never an error — so a
//! damaged file cannot keep the client from starting.

use std::path::{Path, PathBuf};

use crate::state::TaskList;

/// Fixed storage key; the backing file is `<data dir>/tasks.json`.
pub const STORAGE_KEY: &str = "tasks";

/// Errors that can occur when persisting the collection.
///
/// Load never errors (see [`LocalStore::load`]); these only surface from
/// [`LocalStore::save`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to create the data directory.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        /// Directory that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the storage file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize the collection.
    #[error("failed to serialize task list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for the task collection.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Creates a store whose file lives under `dir`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// The platform-default data directory (`<data dir>/taskdeck`), if the
    /// platform exposes one.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("taskdeck"))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored collection.
    ///
    /// A missing file is a normal first run; corrupted or unreadable
    /// content is logged and treated as empty rather than fatal.
    #[must_use]
    pub fn load(&self) -> TaskList {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return TaskList::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "task storage unreadable, starting empty");
                return TaskList::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "task storage corrupted, starting empty");
                TaskList::new()
            }
        }
    }

    /// Serializes the full collection to the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, list: &TaskList) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(list)?;
        std::fs::write(&self.path, json).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
