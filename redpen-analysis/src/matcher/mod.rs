//! The match engine: scans every active rule against essay text and
//! produces grouped, deduplicated suggestions.

pub mod sentences;

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use redpen_core::{AnalysisReport, Analyzer, ErrorCategory, Rule, RuleStore};
use redpen_store::StoreEngine;

use crate::context::ContextEvaluator;
use sentences::split_sentences;

/// Analyze `text` against every active rule in `store`.
///
/// Multi-word expressions match against the whole text; single-word
/// expressions match per sentence and must pass the context evaluator.
/// The category hint does not narrow the scan; every category is matched
/// and the output is grouped by category.
pub fn analyze_document(
    store: &RuleStore,
    evaluator: &ContextEvaluator,
    text: &str,
    category_hint: Option<ErrorCategory>,
) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    if text.trim().is_empty() {
        return report;
    }
    if let Some(hint) = category_hint {
        debug!(category = %hint, "analysis requested with category hint");
    }

    let sentence_list = split_sentences(text);

    for (category, rule) in store.active_rules() {
        let Some(pattern) = rule_pattern(&rule.original) else {
            debug!(original = %rule.original, "skipping rule with unusable expression");
            continue;
        };

        if rule.is_multi_word() {
            if pattern.is_match(text) && overrides_allow(evaluator, rule, &pattern, &sentence_list, text)
            {
                report.push(category, format_suggestion(rule));
            }
            continue;
        }

        for sentence in &sentence_list {
            if !pattern.is_match(sentence) {
                continue;
            }
            if !evaluator.is_genuine_error(&rule.original, sentence, category) {
                continue;
            }
            if let Some(overrides) = &rule.context_rules {
                if !evaluator.allowed_by_overrides(overrides, &rule.original, sentence) {
                    continue;
                }
            }
            report.push(category, format_suggestion(rule));
        }
    }

    report
}

/// Check a multi-word rule's overrides against the sentence containing the
/// match (falling back to the whole text).
fn overrides_allow(
    evaluator: &ContextEvaluator,
    rule: &Rule,
    pattern: &Regex,
    sentence_list: &[&str],
    text: &str,
) -> bool {
    let Some(overrides) = &rule.context_rules else {
        return true;
    };
    let scope = sentence_list
        .iter()
        .find(|s| pattern.is_match(s))
        .copied()
        .unwrap_or(text);
    evaluator.allowed_by_overrides(overrides, &rule.original, scope)
}

/// Word-boundary, case-insensitive pattern for a normalized expression.
fn rule_pattern(original: &str) -> Option<Regex> {
    let escaped = original
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    if escaped.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b{escaped}\b"))
        .case_insensitive(true)
        .build()
        .ok()
}

fn format_suggestion(rule: &Rule) -> String {
    if rule.corrected.is_empty() {
        format!("'{}' may be incorrect", rule.original)
    } else {
        format!(
            "'{}' possibly should be '{}'",
            rule.original,
            rule.corrected.join("' or '")
        )
    }
}

/// The shareable analysis engine: a context evaluator over the store
/// engine's committed snapshots.
pub struct MatchEngine {
    store: Arc<StoreEngine>,
    evaluator: ContextEvaluator,
}

impl MatchEngine {
    pub fn new(store: Arc<StoreEngine>) -> Self {
        Self {
            store,
            evaluator: ContextEvaluator::new(),
        }
    }

    /// Analyze against the latest committed snapshot.
    pub fn analyze(&self, text: &str, category_hint: Option<ErrorCategory>) -> AnalysisReport {
        let snapshot = self.store.snapshot();
        analyze_document(&snapshot, &self.evaluator, text, category_hint)
    }
}

impl Analyzer for MatchEngine {
    fn analyze(&self, text: &str, category_hint: Option<ErrorCategory>) -> AnalysisReport {
        MatchEngine::analyze(self, text, category_hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(category: ErrorCategory, rule: Rule) -> RuleStore {
        let mut store = RuleStore::default();
        store.insert_rule(category, rule);
        store
    }

    fn analyze(store: &RuleStore, text: &str) -> AnalysisReport {
        analyze_document(store, &ContextEvaluator::new(), text, None)
    }

    #[test]
    fn detects_agreement_error() {
        let store = store_with(
            ErrorCategory::SubjectVerbAgreement,
            Rule::new("they is", vec!["they are".into()], 3),
        );
        let report = analyze(&store, "They is happy today.");
        assert_eq!(
            report.issues[&ErrorCategory::SubjectVerbAgreement],
            vec!["'they is' possibly should be 'they are'"]
        );
    }

    #[test]
    fn conditional_if_never_reports() {
        let store = store_with(ErrorCategory::Grammar, Rule::new("if", vec!["whether".into()], 2));
        let report = analyze(&store, "If it rains, I will stay home.");
        assert!(report.is_clean());
    }

    #[test]
    fn removed_rules_do_not_match() {
        let mut rule = Rule::new("buyed", vec!["bought".into()], 1);
        rule.is_removed = true;
        let store = store_with(ErrorCategory::Tense, rule);
        assert!(analyze(&store, "I buyed a car.").is_clean());
    }

    #[test]
    fn word_boundaries_prevent_substring_matches() {
        let store = store_with(ErrorCategory::Spelling, Rule::new("lot", vec!["lots".into()], 1));
        // "pilot" contains "lot" but must not match.
        assert!(analyze(&store, "The pilot landed safely.").is_clean());
    }

    #[test]
    fn repeated_matches_dedupe_within_category() {
        let store = store_with(
            ErrorCategory::Spelling,
            Rule::new("recieve", vec!["receive".into()], 1),
        );
        let report = analyze(&store, "I recieve mail. You recieve mail too.");
        assert_eq!(report.issues[&ErrorCategory::Spelling].len(), 1);
    }

    #[test]
    fn multiple_corrections_join_in_suggestion() {
        let store = store_with(
            ErrorCategory::Tense,
            Rule::new("buyed", vec!["bought".into(), "purchased".into()], 2),
        );
        let report = analyze(&store, "I buyed a car yesterday.");
        assert_eq!(
            report.issues[&ErrorCategory::Tense],
            vec!["'buyed' possibly should be 'bought' or 'purchased'"]
        );
    }

    #[test]
    fn multi_word_matches_across_whole_text() {
        let store = store_with(
            ErrorCategory::Preposition,
            Rule::new("depend of", vec!["depend on".into()], 4),
        );
        let report = analyze(&store, "The plans depend of the weather.");
        assert_eq!(report.total_issues(), 1);
    }

    #[test]
    fn empty_text_is_clean() {
        let store = store_with(ErrorCategory::Tense, Rule::new("buyed", vec![], 1));
        assert!(analyze(&store, "   ").is_clean());
    }

    #[test]
    fn exempt_phrase_override_suppresses_match() {
        let mut rule = Rule::new("kind of", vec!["rather".into()], 2);
        rule.context_rules = Some(redpen_core::ContextRules {
            exempt_phrases: vec!["what kind of".into()],
            ..Default::default()
        });
        let store = store_with(ErrorCategory::WordChoice, rule);

        assert!(analyze(&store, "What kind of music do you like?").is_clean());
        assert_eq!(analyze(&store, "I am kind of tired.").total_issues(), 1);
    }
}
