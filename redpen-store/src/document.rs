//! Load and save the rule store document.
//!
//! Saves always go through a temp file in the target directory followed by
//! an atomic rename, so a failed save leaves the previously committed
//! document intact and readers never observe a torn write.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{error, info, warn};

use redpen_core::errors::StoreError;
use redpen_core::RuleStore;

/// Load the document at `path`.
///
/// A missing file yields an empty default store; a corrupt file is logged
/// and also yields an empty store, so the hosting process always starts.
/// The corrupt file is left in place for inspection.
pub fn load(path: &Path) -> Result<RuleStore, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no rule store document, starting empty");
            return Ok(RuleStore::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(store) => Ok(store),
        Err(source) => {
            error!(
                path = %path.display(),
                error = %source,
                "corrupt rule store document, starting empty"
            );
            Ok(RuleStore::default())
        }
    }
}

/// Strict variant of [`load`]: a corrupt document is an error instead of an
/// empty store. Used by tooling that must not silently discard rules.
pub fn load_strict(path: &Path) -> Result<RuleStore, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `store` and atomically replace the document at `path`.
pub fn save(path: &Path, store: &RuleStore) -> Result<(), StoreError> {
    let json =
        serde_json::to_vec_pretty(store).map_err(|source| StoreError::Serialize { source })?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem.
    let tmp_path = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    };

    let mut tmp = fs::File::create(&tmp_path).map_err(io_err)?;
    tmp.write_all(&json).map_err(io_err)?;
    tmp.sync_all().map_err(io_err)?;
    drop(tmp);

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(())
}

/// Best-effort save wrapper: logs instead of propagating. Returns whether
/// the save succeeded.
pub fn try_save(path: &Path, store: &RuleStore) -> bool {
    match save(path, store) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "rule store save failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redpen_core::{ErrorCategory, Rule};

    #[test]
    fn missing_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("rules.json")).unwrap();
        assert_eq!(store.total_rules(), 0);
    }

    #[test]
    fn corrupt_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, b"{not json").unwrap();
        let store = load(&path).unwrap();
        assert_eq!(store.total_rules(), 0);
        // load_strict surfaces the corruption instead.
        assert!(matches!(
            load_strict(&path),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");

        let mut store = RuleStore::default();
        let mut rule = Rule::new("they is", vec!["they are".into()], 3);
        rule.add_example("They is happy today.", 5);
        store.insert_rule(ErrorCategory::SubjectVerbAgreement, rule);

        save(&path, &store).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        save(&path, &RuleStore::default()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
