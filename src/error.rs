//! Error types for the record store.

use thiserror::Error;

/// Failures surfaced by the store and the view-state holders. Writes that have
/// nothing to do are not errors; they report `WriteOutcome::Skipped` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The SQLite engine rejected a statement (I/O, constraint, corruption).
    #[error("storage fault: {context}")]
    Storage {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Playlist {0} not found")]
    NotFound(i64),

    #[error("data directory unavailable: {0}")]
    DataDirectory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StoreError::Storage { source, .. } => matches!(
                source.sqlite_error_code(),
                Some(rusqlite::ErrorCode::ConstraintViolation)
            ),
            _ => false,
        }
    }
}

/// Attach a short description to rusqlite failures, in the spirit of
/// `anyhow::Context`, while keeping the typed error.
pub(crate) trait StorageContext<T> {
    fn storage(self, context: &'static str) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, rusqlite::Error> {
    fn storage(self, context: &'static str) -> Result<T> {
        self.map_err(|source| StoreError::Storage { context, source })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
