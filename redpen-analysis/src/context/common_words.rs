//! Per-word disambiguation predicates for structurally ambiguous common
//! words.
//!
//! Each entry maps a lowercase word to a predicate deciding whether an
//! occurrence in a (lowercased) sentence is a genuine error. Words listed
//! here are too common to flag on sight; everything hinges on surrounding
//! text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Predicate over (lowercased sentence, lowercased word).
pub type WordPredicate = fn(&str, &str) -> bool;

static TEMPORAL_PREP_WHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(at|on|in|during|after|before|while)\s+when\b").unwrap());

static AT_IN_FIRST: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(at|in)\s+first\b").unwrap());

static LOT_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blot\b").unwrap());
static A_LOT_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\ba\s+lot\s+of\b").unwrap());

static LIFE_POSSESSIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(their|our)\s+life\b|\blives\s+of\b").unwrap());

static PLURAL_QUANTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(many|several)\s+(\w+)").unwrap());

/// The ambiguous-word table. Kept sorted for readability; looked up
/// linearly (the table is small and the lookup is per single-word rule).
pub const AMBIGUOUS_WORDS: &[(&str, WordPredicate)] = &[
    // Context-dependent words with their own heuristics.
    ("when", when_after_temporal_preposition),
    ("if", never_genuine),
    ("first", first_in_fixed_phrase),
    ("lot", lot_outside_fixed_phrase),
    ("life", life_in_possessive_context),
    ("one", never_genuine),
    // Bare singular nouns: only wrong with an explicit plural quantifier.
    ("university", bare_singular_with_plural_quantifier),
    ("school", bare_singular_with_plural_quantifier),
    ("college", bare_singular_with_plural_quantifier),
    // Modal and auxiliary verbs: assumed correct in isolation.
    ("can", never_genuine),
    ("could", never_genuine),
    ("may", never_genuine),
    ("might", never_genuine),
    ("must", never_genuine),
    ("shall", never_genuine),
    ("should", never_genuine),
    ("will", never_genuine),
    ("would", never_genuine),
    ("do", never_genuine),
    ("does", never_genuine),
    ("did", never_genuine),
    ("be", never_genuine),
    ("been", never_genuine),
    ("am", never_genuine),
    // Short prepositions and pronouns.
    ("in", never_genuine),
    ("on", never_genuine),
    ("at", never_genuine),
    ("to", never_genuine),
    ("of", never_genuine),
    ("for", never_genuine),
    ("by", never_genuine),
    ("it", never_genuine),
    ("he", never_genuine),
    ("she", never_genuine),
    ("we", never_genuine),
    ("they", never_genuine),
    ("you", never_genuine),
];

/// Find the predicate for a lowercase word, if it is in the table.
pub fn lookup(word: &str) -> Option<WordPredicate> {
    AMBIGUOUS_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, p)| *p)
}

/// "when" is only wrong after another temporal preposition ("at when",
/// "during when", ...).
fn when_after_temporal_preposition(sentence: &str, _word: &str) -> bool {
    TEMPORAL_PREP_WHEN.is_match(sentence)
}

/// Conditional and similar usages are assumed correct.
fn never_genuine(_sentence: &str, _word: &str) -> bool {
    false
}

/// "first" is only wrong inside "at first" / "in first".
fn first_in_fixed_phrase(sentence: &str, _word: &str) -> bool {
    AT_IN_FIRST.is_match(sentence)
}

/// "lot" is fine inside the fixed phrase "a lot of", wrong elsewhere.
fn lot_outside_fixed_phrase(sentence: &str, _word: &str) -> bool {
    let lots = LOT_ANY.find_iter(sentence).count();
    let fixed = A_LOT_OF.find_iter(sentence).count();
    lots > fixed
}

/// "life" is only wrong in specific possessive/plural contexts.
fn life_in_possessive_context(sentence: &str, _word: &str) -> bool {
    LIFE_POSSESSIVE.is_match(sentence)
}

/// A bare singular noun is only wrong right after a plural quantifier
/// ("many university", "several school").
fn bare_singular_with_plural_quantifier(sentence: &str, word: &str) -> bool {
    PLURAL_QUANTIFIER
        .captures_iter(sentence)
        .any(|caps| caps.get(2).is_some_and(|m| m.as_str() == word))
}
