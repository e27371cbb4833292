//! Timestamped document backups with retention pruning.
//!
//! Backups are fire-and-forget crash-recovery aids, not a transaction log:
//! a failed backup never blocks the main write.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use redpen_core::errors::StoreError;

/// Copy the document at `path` into `backup_dir` under a timestamped name.
///
/// A missing document is not an error; there is simply nothing to snapshot
/// and `None` is returned.
pub fn snapshot(path: &Path, backup_dir: &Path) -> Result<Option<PathBuf>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }

    fs::create_dir_all(backup_dir).map_err(|source| StoreError::Io {
        path: backup_dir.to_path_buf(),
        source,
    })?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rules");
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6f");
    let backup_path = backup_dir.join(format!("{stem}-{stamp}.json"));

    fs::copy(path, &backup_path).map_err(|e| StoreError::Backup {
        path: backup_path.clone(),
        reason: e.to_string(),
    })?;

    debug!(backup = %backup_path.display(), "rule store snapshot written");
    Ok(Some(backup_path))
}

/// Best-effort snapshot: logs instead of propagating.
pub fn try_snapshot(path: &Path, backup_dir: &Path) -> Option<PathBuf> {
    match snapshot(path, backup_dir) {
        Ok(backup) => backup,
        Err(e) => {
            warn!(error = %e, "rule store snapshot failed");
            None
        }
    }
}

/// Delete all but the newest `keep` backups. Returns how many were removed.
///
/// Backup filenames embed a UTC timestamp, so lexical order is age order.
pub fn prune(backup_dir: &Path, keep: usize) -> usize {
    let entries = match fs::read_dir(backup_dir) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };

    let mut backups: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    backups.sort();

    if backups.len() <= keep {
        return 0;
    }

    let excess = backups.len() - keep;
    let mut removed = 0;
    for path in backups.into_iter().take(excess) {
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "backup prune failed"),
        }
    }
    removed
}
