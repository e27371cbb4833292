//! The weight policy: what a new rule starts at, and how rejections
//! decay it.

use redpen_core::ErrorCategory;

/// Initial weight of a freshly learned rule.
///
/// Base 1, plus a multi-word specificity bonus of min(5, word count), plus
/// 2 when the category is high-precision.
pub fn initial_weight(original: &str, category: ErrorCategory) -> u32 {
    let words = original.split_whitespace().count();
    let mut weight = 1u32;
    if words > 1 {
        weight += words.min(5) as u32;
    }
    if category.is_high_precision() {
        weight += 2;
    }
    weight
}

/// Decay a weight by the false-positive penalty, floored at zero.
pub fn apply_penalty(weight: u32, penalty: u32) -> u32 {
    weight.saturating_sub(penalty)
}
