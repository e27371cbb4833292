//! The maintenance pass: purge, then merge, per category.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::info;

use redpen_core::config::defaults::DEFAULT_MAX_EXAMPLES;
use redpen_core::{MaintenanceReport, RedpenResult, Rule, RuleStore};
use redpen_store::StoreEngine;

use crate::merge::merge_group;

/// Compact the store in place: drop soft-deleted rules, then fold
/// duplicates sharing an `original` within each category.
///
/// A merged rule that ends up satisfying the removal invariant (weight
/// zero, or enough accumulated false-positive reports) is dropped in the
/// same pass, so running twice in a row never produces further changes.
pub fn optimize(store: &mut RuleStore) -> MaintenanceReport {
    let mut report = MaintenanceReport::default();

    for (category, rules) in store.rules.iter_mut() {
        let before = rules.len();
        rules.retain(|r| !r.is_removed);
        let purged = before - rules.len();

        // Group by expression, preserving first-seen order.
        let mut order: Vec<String> = Vec::new();
        let mut groups: FxHashMap<String, Vec<Rule>> = FxHashMap::default();
        for rule in rules.drain(..) {
            if !groups.contains_key(&rule.original) {
                order.push(rule.original.clone());
            }
            groups.entry(rule.original.clone()).or_default().push(rule);
        }

        let mut merged_here = 0;
        let mut purged_after_merge = 0;
        for key in order {
            let group = groups.remove(&key).unwrap_or_default();
            let size = group.len();
            if size <= 1 {
                rules.extend(group);
                continue;
            }

            merged_here += size - 1;
            let mut merged = merge_group(group, DEFAULT_MAX_EXAMPLES);
            merged.apply_removal_invariant();
            if merged.is_removed {
                purged_after_merge += 1;
            } else {
                rules.push(merged);
            }
        }

        report.removed += purged + purged_after_merge;
        report.merged += merged_here;

        if purged + purged_after_merge + merged_here > 0 {
            info!(
                category = %category,
                removed = purged + purged_after_merge,
                merged = merged_here,
                "category maintained"
            );
        }
    }

    store.rules.retain(|_, rules| !rules.is_empty());
    report
}

/// The offline maintenance operation over the store engine. Each run
/// commits through the engine, which snapshots the document before
/// mutating it.
pub struct Maintainer {
    store: Arc<StoreEngine>,
}

impl Maintainer {
    pub fn new(store: Arc<StoreEngine>) -> Self {
        Self { store }
    }

    pub fn run(&self) -> RedpenResult<MaintenanceReport> {
        let report = self.store.commit(optimize)?;
        info!(
            removed = report.removed,
            merged = report.merged,
            "maintenance pass finished"
        );
        Ok(report)
    }
}
