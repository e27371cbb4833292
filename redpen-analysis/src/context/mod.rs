//! Context-sensitive disambiguation: decides whether a lexical match is a
//! genuine error given the sentence around it.

pub mod common_words;
pub mod grammar;

use redpen_core::{ContextRules, ErrorCategory};

/// Pure decision function for candidate matches.
///
/// Stateless; safe to share across request threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextEvaluator;

impl ContextEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `expression`, found in `sentence` under `category`,
    /// is a genuine error or a benign use of a common word.
    ///
    /// Decision order:
    /// 1. single ambiguous common word → per-word predicate;
    /// 2. spelling → always genuine;
    /// 3. article / agreement / tense → category grammar check;
    /// 4. everything else → genuine by default (multi-word expressions are
    ///    specific enough to trust without narrowing).
    pub fn is_genuine_error(
        &self,
        expression: &str,
        sentence: &str,
        category: ErrorCategory,
    ) -> bool {
        let sentence = sentence.to_lowercase();
        let mut tokens = expression.split_whitespace();
        let first = tokens.next().map(str::to_lowercase);
        let single_token = tokens.next().is_none();

        if single_token {
            if let Some(word) = first {
                if let Some(predicate) = common_words::lookup(&word) {
                    return predicate(&sentence, &word);
                }
            }
        }

        if category == ErrorCategory::Spelling {
            return true;
        }

        grammar::check(category, &sentence)
    }

    /// Apply a rule's own disambiguation overrides: exempt phrases suppress
    /// the match outright, and neighbor-word constraints are checked
    /// against the words adjacent to the expression.
    pub fn allowed_by_overrides(
        &self,
        overrides: &ContextRules,
        expression: &str,
        sentence: &str,
    ) -> bool {
        let sentence = sentence.to_lowercase();

        if overrides
            .exempt_phrases
            .iter()
            .any(|phrase| sentence.contains(&phrase.to_lowercase()))
        {
            return false;
        }

        let (before, after) = match neighbor_words(&sentence, &expression.to_lowercase()) {
            Some(pair) => pair,
            None => return true,
        };

        let word_in = |list: &[String], word: Option<&str>| {
            word.is_some_and(|w| list.iter().any(|item| item.to_lowercase() == w))
        };

        if !overrides.required_before.is_empty() && !word_in(&overrides.required_before, before) {
            return false;
        }
        if word_in(&overrides.forbidden_before, before) {
            return false;
        }
        if !overrides.required_after.is_empty() && !word_in(&overrides.required_after, after) {
            return false;
        }
        if word_in(&overrides.forbidden_after, after) {
            return false;
        }
        true
    }
}

/// The words immediately before and after the first occurrence of
/// `expression` in `sentence` (both already lowercased).
fn neighbor_words<'a>(
    sentence: &'a str,
    expression: &str,
) -> Option<(Option<&'a str>, Option<&'a str>)> {
    let start = sentence.find(expression)?;
    let end = start + expression.len();
    let before = sentence[..start]
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .next_back();
    let after = sentence[end..]
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .find(|w| !w.is_empty());
    Some((before, after))
}
