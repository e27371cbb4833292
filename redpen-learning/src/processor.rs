//! The feedback processor: turns reviewer signals into rule mutations.
//!
//! A whole batch commits as one store mutation. A failure on one event is
//! logged and never blocks the rest of the batch, and every examined event
//! ends up processed exactly once, including malformed ones, so they are
//! never re-delivered.

use std::sync::Arc;

use tracing::{debug, info, warn};

use redpen_core::config::LearningConfig;
use redpen_core::{
    FeedbackEvent, FeedbackKind, FeedbackLogKind, FeedbackStats, RedpenResult, Rule, RuleStore,
};
use redpen_store::StoreEngine;

use crate::categorize::infer_category;
use crate::source::FeedbackSource;
use crate::weights::{apply_penalty, initial_weight};

enum Outcome {
    Missed,
    FalsePositive,
    General,
    Skipped,
}

/// Consumes feedback events and mutates the rule store.
pub struct FeedbackProcessor {
    store: Arc<StoreEngine>,
    config: LearningConfig,
}

impl FeedbackProcessor {
    pub fn new(store: Arc<StoreEngine>) -> Self {
        Self::with_config(store, LearningConfig::default())
    }

    pub fn with_config(store: Arc<StoreEngine>, config: LearningConfig) -> Self {
        Self { store, config }
    }

    /// Fetch one bounded batch from `source`, apply it, and acknowledge
    /// every consumed event.
    pub fn drain(&self, source: &mut dyn FeedbackSource) -> RedpenResult<FeedbackStats> {
        let mut batch = source.pending(self.config.batch_size);
        if batch.is_empty() {
            return Ok(FeedbackStats::default());
        }
        let stats = self.apply(&mut batch)?;
        let ids: Vec<String> = batch
            .iter()
            .filter(|e| e.processed)
            .map(|e| e.id.clone())
            .collect();
        source.ack(&ids);
        Ok(stats)
    }

    /// Apply a batch of events in order, committing the result as a single
    /// store mutation. Events already processed are left untouched.
    pub fn apply(&self, events: &mut [FeedbackEvent]) -> RedpenResult<FeedbackStats> {
        let config = self.config.clone();
        let stats = self.store.commit(move |store| {
            let mut stats = FeedbackStats::default();
            for event in events.iter_mut() {
                if event.processed {
                    continue;
                }
                match apply_event(store, &config, event) {
                    Outcome::Missed => stats.missed += 1,
                    Outcome::FalsePositive => stats.false_positive += 1,
                    Outcome::General => stats.general += 1,
                    Outcome::Skipped => stats.skipped += 1,
                }
                event.processed = true;
            }
            stats
        })?;

        info!(
            missed = stats.missed,
            false_positive = stats.false_positive,
            general = stats.general,
            skipped = stats.skipped,
            "feedback batch applied"
        );
        Ok(stats)
    }
}

fn apply_event(store: &mut RuleStore, config: &LearningConfig, event: &FeedbackEvent) -> Outcome {
    match event.kind {
        FeedbackKind::MissedIssue => apply_missed(store, config, event),
        FeedbackKind::FalsePositive => apply_false_positive(store, config, event),
        FeedbackKind::General => {
            debug!(
                event = %event.id,
                reviewer = %event.reviewer_id,
                comment = event.comment.as_deref().unwrap_or(""),
                "general feedback recorded"
            );
            Outcome::General
        }
    }
}

fn apply_missed(store: &mut RuleStore, config: &LearningConfig, event: &FeedbackEvent) -> Outcome {
    let wrong = event.wrong_expression.trim();
    let correct = event
        .correct_expression
        .as_deref()
        .map(str::trim)
        .unwrap_or("");
    if wrong.is_empty() || correct.is_empty() {
        warn!(event = %event.id, "missed-issue event without expressions, skipping");
        return Outcome::Skipped;
    }

    let category = event
        .declared_category()
        .unwrap_or_else(|| infer_category(wrong, correct));
    let excerpt = excerpt_of(event, config.excerpt_max_chars);

    if let Some(rule) = store.find_rule_mut(category, wrong) {
        rule.add_correction(correct);
        rule.weight += 1;
        rule.add_example(&excerpt, config.max_examples);
        rule.record_feedback(FeedbackLogKind::Missed, &excerpt);
        rule.touch();
        debug!(original = %rule.original, category = %category, weight = rule.weight, "rule reinforced");
    } else {
        let weight = initial_weight(wrong, category);
        let mut rule = Rule::new(wrong, vec![correct.to_string()], weight);
        rule.add_example(&excerpt, config.max_examples);
        rule.record_feedback(FeedbackLogKind::Missed, &excerpt);
        info!(original = %rule.original, category = %category, weight, "rule learned");
        store.insert_rule(category, rule);
    }
    Outcome::Missed
}

fn apply_false_positive(
    store: &mut RuleStore,
    config: &LearningConfig,
    event: &FeedbackEvent,
) -> Outcome {
    let wrong = event.wrong_expression.trim();
    if wrong.is_empty() {
        warn!(event = %event.id, "false-positive event without an expression, skipping");
        return Outcome::Skipped;
    }

    let Some((category, rule)) = store.find_rule_any_category_mut(wrong) else {
        warn!(expression = wrong, "false-positive for unknown rule, skipping");
        return Outcome::Skipped;
    };

    let excerpt = excerpt_of(event, config.excerpt_max_chars);
    rule.weight = apply_penalty(rule.weight, config.false_positive_penalty);
    rule.record_feedback(FeedbackLogKind::FalsePositive, &excerpt);
    if rule.weight <= 1 {
        rule.potential_false_positive = true;
    }
    rule.apply_removal_invariant();
    rule.touch();

    debug!(
        original = %rule.original,
        category = %category,
        weight = rule.weight,
        removed = rule.is_removed,
        "rule penalized"
    );
    Outcome::FalsePositive
}

/// The stored context excerpt for an event: the reviewer's comment,
/// truncated on a character boundary.
fn excerpt_of(event: &FeedbackEvent, max_chars: usize) -> String {
    event
        .comment
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(max_chars)
        .collect()
}
