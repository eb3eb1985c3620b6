use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog source is missing, malformed, or lacks a required column.
    #[error("failed to load catalog from {}: {message}", .path.display())]
    CatalogLoad { path: PathBuf, message: String },

    /// A query was rejected before filtering; `field` names the offending input.
    #[error("invalid query: {field}: {message}")]
    InvalidQuery { field: &'static str, message: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    pub(crate) fn invalid_query(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            field,
            message: message.into(),
        }
    }

    /// Returns `true` when the error was caused by the caller's query rather
    /// than by the catalog or the environment.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
