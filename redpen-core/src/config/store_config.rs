use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Rule store persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the rule store document.
    pub document_path: PathBuf,
    /// Directory for timestamped backups.
    pub backup_dir: PathBuf,
    /// Backups retained by a prune pass.
    pub backup_keep: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from(defaults::DEFAULT_DOCUMENT_FILENAME),
            backup_dir: PathBuf::from(defaults::DEFAULT_BACKUP_DIRNAME),
            backup_keep: defaults::DEFAULT_BACKUP_KEEP,
        }
    }
}

impl StoreConfig {
    /// Config rooted at a data directory, with the default filenames.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            document_path: dir.join(defaults::DEFAULT_DOCUMENT_FILENAME),
            backup_dir: dir.join(defaults::DEFAULT_BACKUP_DIRNAME),
            backup_keep: defaults::DEFAULT_BACKUP_KEEP,
        }
    }
}
