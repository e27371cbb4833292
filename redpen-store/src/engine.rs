//! The single-writer store engine.
//!
//! All mutations go through [`StoreEngine::commit`], which serializes
//! writers behind a mutex and publishes each committed document as an
//! immutable `Arc` snapshot. The read path clones the `Arc` and never
//! observes a half-written document.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::info;

use redpen_core::config::StoreConfig;
use redpen_core::errors::StoreError;
use redpen_core::RuleStore;

use crate::{backup, document};

/// Owns the rule store document and serializes every mutation.
pub struct StoreEngine {
    config: StoreConfig,
    /// The last committed document, shared with readers.
    current: RwLock<Arc<RuleStore>>,
    /// Serializes load-mutate-save cycles.
    writer: Mutex<()>,
}

impl StoreEngine {
    /// Open the engine, loading the document at the configured path.
    /// A missing or corrupt document starts the engine on an empty store.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let store = document::load(&config.document_path)?;
        info!(
            path = %config.document_path.display(),
            rules = store.total_rules(),
            "rule store opened"
        );
        Ok(Self {
            config,
            current: RwLock::new(Arc::new(store)),
            writer: Mutex::new(()),
        })
    }

    /// Open with default filenames rooted at `dir`.
    pub fn open_in_dir(dir: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        Self::open(StoreConfig::in_dir(dir))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The last committed document. Cheap to clone, safe to hold across a
    /// concurrent commit.
    pub fn snapshot(&self) -> Arc<RuleStore> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `mutate` to a copy of the current document and commit it:
    /// snapshot the on-disk document (best-effort), save atomically, then
    /// publish the new document to readers.
    ///
    /// A failed save leaves both the on-disk document and the published
    /// snapshot untouched.
    pub fn commit<T>(&self, mutate: impl FnOnce(&mut RuleStore) -> T) -> Result<T, StoreError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut working = RuleStore::clone(&self.snapshot());
        let out = mutate(&mut working);

        backup::try_snapshot(&self.config.document_path, &self.config.backup_dir);
        document::save(&self.config.document_path, &working)?;

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(working);
        Ok(out)
    }

    /// Re-read the document from disk, replacing the published snapshot.
    pub fn reload(&self) -> Result<(), StoreError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let store = document::load(&self.config.document_path)?;
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(store);
        Ok(())
    }

    /// Take an on-demand snapshot of the on-disk document. Returns the
    /// backup path, or `None` when no document has been committed yet.
    pub fn snapshot_document(&self) -> Result<Option<std::path::PathBuf>, StoreError> {
        backup::snapshot(&self.config.document_path, &self.config.backup_dir)
    }

    /// Apply the configured backup retention. Returns backups removed.
    pub fn prune_backups(&self) -> usize {
        backup::prune(&self.config.backup_dir, self.config.backup_keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redpen_core::{ErrorCategory, Rule};

    fn engine_in(dir: &std::path::Path) -> StoreEngine {
        StoreEngine::open_in_dir(dir).unwrap()
    }

    #[test]
    fn commit_persists_and_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        engine
            .commit(|store| {
                store.insert_rule(ErrorCategory::Tense, Rule::new("buyed", vec![], 1));
            })
            .unwrap();

        assert_eq!(engine.snapshot().total_rules(), 1);

        // A fresh engine sees the committed document.
        let reopened = engine_in(dir.path());
        assert_eq!(reopened.snapshot().total_rules(), 1);
    }

    #[test]
    fn reader_snapshot_is_isolated_from_commit() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let before = engine.snapshot();
        engine
            .commit(|store| {
                store.insert_rule(ErrorCategory::Spelling, Rule::new("recieve", vec![], 1));
            })
            .unwrap();

        assert_eq!(before.total_rules(), 0);
        assert_eq!(engine.snapshot().total_rules(), 1);
    }

    #[test]
    fn commit_snapshots_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        // First commit: nothing on disk yet, so no backup is taken.
        engine.commit(|_| ()).unwrap();
        // Second commit snapshots the document written by the first.
        engine.commit(|_| ()).unwrap();

        let backups = std::fs::read_dir(&engine.config().backup_dir)
            .unwrap()
            .count();
        assert_eq!(backups, 1);
    }
}
