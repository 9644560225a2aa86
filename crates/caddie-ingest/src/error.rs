//! Ingestion error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Malformed CSV (bad quoting, invalid UTF-8, unreadable header).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The library file exists but is not a valid library document.
    #[error("library JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV has no data rows")]
    Empty,
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
