use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Maximum events consumed per batch, oldest first.
    pub batch_size: usize,
    /// Weight subtracted per false-positive report.
    pub false_positive_penalty: u32,
    /// Context excerpts retained per rule.
    pub max_examples: usize,
    /// Longest stored context excerpt, in characters.
    pub excerpt_max_chars: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::DEFAULT_FEEDBACK_BATCH_SIZE,
            false_positive_penalty: defaults::DEFAULT_FALSE_POSITIVE_PENALTY,
            max_examples: defaults::DEFAULT_MAX_EXAMPLES,
            excerpt_max_chars: defaults::DEFAULT_EXCERPT_MAX_CHARS,
        }
    }
}
