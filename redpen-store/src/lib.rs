//! Rule store persistence: document load/save with atomic replace,
//! timestamped backups with retention pruning, and the single-writer
//! [`StoreEngine`] that serializes mutations and publishes immutable
//! snapshots to the read path.

pub mod backup;
pub mod document;
pub mod engine;

pub use engine::StoreEngine;
