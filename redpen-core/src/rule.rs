//! The learned rule model: erroneous expression → accepted corrections,
//! with trust metadata and an append-only feedback log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many false-positive reports remove a rule.
pub const FALSE_POSITIVE_REMOVAL_THRESHOLD: usize = 3;

/// Structured disambiguation overrides attached to a single rule.
///
/// These narrow when the rule may fire, on top of the built-in
/// context heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextRules {
    /// Phrases that exempt a match when present in the sentence.
    pub exempt_phrases: Vec<String>,
    /// Words that must appear immediately before the expression.
    pub required_before: Vec<String>,
    /// Words that must not appear immediately before the expression.
    pub forbidden_before: Vec<String>,
    /// Words that must appear immediately after the expression.
    pub required_after: Vec<String>,
    /// Words that must not appear immediately after the expression.
    pub forbidden_after: Vec<String>,
    /// Free-text reviewer notes.
    pub notes: Vec<String>,
}

impl ContextRules {
    pub fn is_empty(&self) -> bool {
        self.exempt_phrases.is_empty()
            && self.required_before.is_empty()
            && self.forbidden_before.is_empty()
            && self.required_after.is_empty()
            && self.forbidden_after.is_empty()
            && self.notes.is_empty()
    }

    /// Union another set of overrides into this one, deduplicating.
    pub fn merge(&mut self, other: &ContextRules) {
        merge_unique(&mut self.exempt_phrases, &other.exempt_phrases);
        merge_unique(&mut self.required_before, &other.required_before);
        merge_unique(&mut self.forbidden_before, &other.forbidden_before);
        merge_unique(&mut self.required_after, &other.required_after);
        merge_unique(&mut self.forbidden_after, &other.forbidden_after);
        merge_unique(&mut self.notes, &other.notes);
    }
}

fn merge_unique(dst: &mut Vec<String>, src: &[String]) {
    for item in src {
        if !dst.iter().any(|existing| existing == item) {
            dst.push(item.clone());
        }
    }
}

/// Kind of reviewer signal recorded against a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLogKind {
    Missed,
    FalsePositive,
}

/// One append-only feedback log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackLogEntry {
    pub kind: FeedbackLogKind,
    pub timestamp: DateTime<Utc>,
    /// Verbatim context the signal referred to, possibly empty.
    #[serde(default)]
    pub context: String,
}

/// A learned mapping from an erroneous expression to one or more
/// corrections, with trust metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The erroneous expression, lowercase-normalized, 1..N words.
    pub original: String,
    /// Accepted replacements. Set semantics, insertion order preserved.
    pub corrected: Vec<String>,
    /// Non-negative trust score. Governs ranking and eventual removal.
    pub weight: u32,
    /// Bounded, deduplicated verbatim context excerpts where the rule fired.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Optional disambiguation overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_rules: Option<ContextRules>,
    /// Append-only reviewer signal history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feedback_log: Vec<FeedbackLogEntry>,
    /// Set when repeated rejections drop the weight to ≤ 1.
    #[serde(default)]
    pub potential_false_positive: bool,
    /// Soft delete: excluded from matching, purged by maintenance.
    #[serde(default)]
    pub is_removed: bool,
    pub last_updated: DateTime<Utc>,
}

impl Rule {
    /// Create a new rule with a normalized expression.
    pub fn new(original: &str, corrected: Vec<String>, weight: u32) -> Self {
        Self {
            original: normalize_expression(original),
            corrected,
            weight,
            examples: Vec::new(),
            context_rules: None,
            feedback_log: Vec::new(),
            potential_false_positive: false,
            is_removed: false,
            last_updated: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_removed
    }

    pub fn word_count(&self) -> usize {
        self.original.split_whitespace().count()
    }

    pub fn is_multi_word(&self) -> bool {
        self.word_count() > 1
    }

    /// Add a correction if not already present. Returns true when added.
    pub fn add_correction(&mut self, correction: &str) -> bool {
        let correction = correction.trim();
        if correction.is_empty() {
            return false;
        }
        if self
            .corrected
            .iter()
            .any(|c| c.eq_ignore_ascii_case(correction))
        {
            return false;
        }
        self.corrected.push(correction.to_string());
        true
    }

    /// Add a context excerpt, deduplicated and bounded to `cap` entries.
    /// Returns true when added.
    pub fn add_example(&mut self, excerpt: &str, cap: usize) -> bool {
        let excerpt = excerpt.trim();
        if excerpt.is_empty() || self.examples.len() >= cap {
            return false;
        }
        if self.examples.iter().any(|e| e == excerpt) {
            return false;
        }
        self.examples.push(excerpt.to_string());
        true
    }

    pub fn record_feedback(&mut self, kind: FeedbackLogKind, context: &str) {
        self.feedback_log.push(FeedbackLogEntry {
            kind,
            timestamp: Utc::now(),
            context: context.to_string(),
        });
    }

    pub fn false_positive_count(&self) -> usize {
        self.feedback_log
            .iter()
            .filter(|e| e.kind == FeedbackLogKind::FalsePositive)
            .count()
    }

    /// Re-derive the soft-delete flag. A rule is removed whenever its
    /// weight has decayed to zero or it has accumulated
    /// [`FALSE_POSITIVE_REMOVAL_THRESHOLD`] false-positive reports.
    pub fn apply_removal_invariant(&mut self) {
        if self.weight == 0 || self.false_positive_count() >= FALSE_POSITIVE_REMOVAL_THRESHOLD {
            self.is_removed = true;
        }
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize_expression(raw: &str) -> String {
    raw.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
