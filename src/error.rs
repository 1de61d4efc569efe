//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Fatal analysis error. No partial report is produced.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Project metadata problem. Always recovered by the loader.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
