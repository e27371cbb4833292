//! Batch maintenance for the rule store: hard-delete soft-removed rules
//! and fold duplicate rules that share an erroneous expression within a
//! category. Idempotent: a second consecutive run is a no-op.

pub mod merge;
pub mod optimizer;

pub use optimizer::{optimize, Maintainer};
