//! Error types for vitals-store.

use std::path::PathBuf;

use vitals_types::Collection;

/// Result type for vitals-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vitals-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The database could not be created, opened, or initialized.
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The database was written by a newer schema than this build knows.
    #[error("Unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedSchema { found: i32, supported: i32 },

    /// An insert into one collection failed.
    #[error("Failed to save {collection} record: {source}")]
    WriteFailed {
        collection: Collection,
        #[source]
        source: rusqlite::Error,
    },

    /// Database error from SQLite while reading.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record limit of zero was requested.
    #[error("Invalid limit: {0} (must be at least 1)")]
    InvalidLimit(u32),

    /// Invalid timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unavailable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::StorageUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Returns `true` if the database could not be opened at all.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::StorageUnavailable { .. })
    }

    /// Returns `true` if a save failed.
    pub fn is_write_failed(&self) -> bool {
        matches!(self, Error::WriteFailed { .. })
    }
}
