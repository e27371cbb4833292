//! Rule store persistence errors.

use std::path::PathBuf;

/// Errors from loading, saving, or snapshotting the rule store document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt document at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize document: {source}")]
    Serialize { source: serde_json::Error },

    #[error("backup failed for {path}: {reason}")]
    Backup { path: PathBuf, reason: String },
}
