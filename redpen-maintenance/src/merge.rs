//! Folding a group of duplicate rules into one.

use redpen_core::Rule;

/// Fold rules sharing the same `original` into a single rule.
///
/// Corrections, examples, and context overrides are set-unioned; the
/// weight is the group maximum; feedback logs concatenate. The merged
/// rule's `last_updated` is the merge time.
///
/// Panics if `group` is empty; callers always pass at least one rule.
pub fn merge_group(mut group: Vec<Rule>, example_cap: usize) -> Rule {
    let mut merged = group.remove(0);

    for rule in group {
        for correction in &rule.corrected {
            merged.add_correction(correction);
        }
        for example in &rule.examples {
            merged.add_example(example, example_cap);
        }
        merged.weight = merged.weight.max(rule.weight);
        merged.feedback_log.extend(rule.feedback_log);
        merged.potential_false_positive |= rule.potential_false_positive;

        if let Some(overrides) = rule.context_rules {
            match &mut merged.context_rules {
                Some(existing) => existing.merge(&overrides),
                None => merged.context_rules = Some(overrides),
            }
        }
    }

    merged.touch();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use redpen_core::{ContextRules, FeedbackLogKind};

    #[test]
    fn merge_unions_corrections() {
        let a = Rule::new("buyed", vec!["bought".into()], 2);
        let b = Rule::new("buyed", vec!["purchased".into()], 5);

        let merged = merge_group(vec![a, b], 5);
        assert_eq!(merged.corrected, vec!["bought", "purchased"]);
        assert_eq!(merged.weight, 5);
    }

    #[test]
    fn merge_concatenates_feedback_logs() {
        let mut a = Rule::new("buyed", vec![], 1);
        a.record_feedback(FeedbackLogKind::Missed, "essay one");
        let mut b = Rule::new("buyed", vec![], 1);
        b.record_feedback(FeedbackLogKind::FalsePositive, "essay two");

        let merged = merge_group(vec![a, b], 5);
        assert_eq!(merged.feedback_log.len(), 2);
    }

    #[test]
    fn merge_unions_context_overrides() {
        let mut a = Rule::new("kind of", vec![], 1);
        a.context_rules = Some(ContextRules {
            exempt_phrases: vec!["what kind of".into()],
            notes: vec!["colloquial".into()],
            ..Default::default()
        });
        let mut b = Rule::new("kind of", vec![], 1);
        b.context_rules = Some(ContextRules {
            exempt_phrases: vec!["what kind of".into(), "this kind of".into()],
            ..Default::default()
        });

        let merged = merge_group(vec![a, b], 5);
        let overrides = merged.context_rules.unwrap();
        assert_eq!(
            overrides.exempt_phrases,
            vec!["what kind of", "this kind of"]
        );
        assert_eq!(overrides.notes, vec!["colloquial"]);
    }

    #[test]
    fn merge_caps_examples() {
        let mut a = Rule::new("buyed", vec![], 1);
        a.add_example("one", 5);
        a.add_example("two", 5);
        let mut b = Rule::new("buyed", vec![], 1);
        b.add_example("three", 5);
        b.add_example("four", 5);

        let merged = merge_group(vec![a, b], 3);
        assert_eq!(merged.examples.len(), 3);
    }
}
