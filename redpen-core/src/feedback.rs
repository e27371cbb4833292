//! Reviewer feedback events and per-batch processing stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::ErrorCategory;

/// Kind of reviewer signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// The engine missed a genuine error (wrong → correct pair supplied).
    MissedIssue,
    /// The engine flagged a benign expression.
    FalsePositive,
    /// Free-form comment, recorded for audit only.
    General,
}

/// A human-originated correction/rejection signal from the review surface.
///
/// Consumed exactly once: `processed` flips to true after ingestion, even
/// when the mutation itself was a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub id: String,
    pub essay_id: String,
    pub reviewer_id: String,
    pub kind: FeedbackKind,
    /// The expression the signal is about.
    #[serde(default)]
    pub wrong_expression: String,
    /// The replacement, for missed-issue events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_expression: Option<String>,
    /// Reviewer-declared category, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(essay_id: &str, reviewer_id: &str, kind: FeedbackKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            essay_id: essay_id.to_string(),
            reviewer_id: reviewer_id.to_string(),
            kind,
            wrong_expression: String::new(),
            correct_expression: None,
            category: None,
            comment: None,
            processed: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_expressions(mut self, wrong: &str, correct: Option<&str>) -> Self {
        self.wrong_expression = wrong.to_string();
        self.correct_expression = correct.map(str::to_string);
        self
    }

    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// The reviewer's category, unless absent or `unknown`.
    pub fn declared_category(&self) -> Option<ErrorCategory> {
        self.category.filter(|c| *c != ErrorCategory::Unknown)
    }
}

/// Counters for one feedback batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub missed: usize,
    pub false_positive: usize,
    pub general: usize,
    /// Malformed or unresolvable events that were consumed without effect.
    pub skipped: usize,
}

impl FeedbackStats {
    pub fn total(&self) -> usize {
        self.missed + self.false_positive + self.general + self.skipped
    }
}
