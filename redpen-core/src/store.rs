//! The rule store document: every learned rule plus category display labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::ErrorCategory;
use crate::rule::{normalize_expression, Rule};

/// The single source of truth: category → rules, category → display label.
///
/// The document is replaced wholesale on every committed mutation; there is
/// no secondary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleStore {
    pub rules: BTreeMap<ErrorCategory, Vec<Rule>>,
    pub descriptions: BTreeMap<ErrorCategory, String>,
}

impl Default for RuleStore {
    fn default() -> Self {
        let descriptions = ErrorCategory::ALL
            .iter()
            .map(|c| (*c, c.label().to_string()))
            .collect();
        Self {
            rules: BTreeMap::new(),
            descriptions,
        }
    }
}

impl RuleStore {
    /// Iterate active (non-removed) rules with their categories.
    pub fn active_rules(&self) -> impl Iterator<Item = (ErrorCategory, &Rule)> {
        self.rules
            .iter()
            .flat_map(|(cat, rules)| rules.iter().filter(|r| r.is_active()).map(|r| (*cat, r)))
    }

    /// Find an active rule by normalized expression within one category.
    pub fn find_rule_mut(&mut self, category: ErrorCategory, original: &str) -> Option<&mut Rule> {
        let needle = normalize_expression(original);
        self.rules
            .get_mut(&category)?
            .iter_mut()
            .find(|r| r.is_active() && r.original == needle)
    }

    /// Find a rule by normalized expression in any category, removed or not.
    /// Returns the category alongside the rule.
    pub fn find_rule_any_category_mut(
        &mut self,
        original: &str,
    ) -> Option<(ErrorCategory, &mut Rule)> {
        let needle = normalize_expression(original);
        for (cat, rules) in self.rules.iter_mut() {
            if let Some(rule) = rules.iter_mut().find(|r| r.original == needle) {
                return Some((*cat, rule));
            }
        }
        None
    }

    /// Append a rule to its category bucket.
    pub fn insert_rule(&mut self, category: ErrorCategory, rule: Rule) {
        self.rules.entry(category).or_default().push(rule);
    }

    /// Total rule count, including removed rules awaiting maintenance.
    pub fn total_rules(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Active rule count.
    pub fn active_rule_count(&self) -> usize {
        self.rules
            .values()
            .map(|rules| rules.iter().filter(|r| r.is_active()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seeds_every_description() {
        let store = RuleStore::default();
        assert_eq!(store.descriptions.len(), ErrorCategory::COUNT);
        assert_eq!(
            store.descriptions.get(&ErrorCategory::Tense).unwrap(),
            "Verb tense"
        );
        assert_eq!(store.total_rules(), 0);
    }

    #[test]
    fn find_rule_mut_skips_removed() {
        let mut store = RuleStore::default();
        let mut rule = Rule::new("buyed", vec!["bought".into()], 1);
        rule.is_removed = true;
        store.insert_rule(ErrorCategory::Tense, rule);

        assert!(store.find_rule_mut(ErrorCategory::Tense, "buyed").is_none());
        // The cross-category lookup still sees it.
        assert!(store.find_rule_any_category_mut("buyed").is_some());
    }

    #[test]
    fn find_rule_mut_normalizes_needle() {
        let mut store = RuleStore::default();
        store.insert_rule(ErrorCategory::Tense, Rule::new("they is", vec![], 1));
        assert!(store
            .find_rule_mut(ErrorCategory::Tense, "  They   IS ")
            .is_some());
    }

    #[test]
    fn active_rules_spans_categories() {
        let mut store = RuleStore::default();
        store.insert_rule(ErrorCategory::Tense, Rule::new("buyed", vec![], 1));
        store.insert_rule(ErrorCategory::Spelling, Rule::new("recieve", vec![], 1));
        assert_eq!(store.active_rules().count(), 2);
    }
}
