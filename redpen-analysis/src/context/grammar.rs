//! Small category-specific grammatical checks, applied to the sentence a
//! candidate expression appears in.

use once_cell::sync::Lazy;
use regex::Regex;

use redpen_core::ErrorCategory;

/// "a" before a vowel sound or "an" before a consonant sound.
static INDEFINITE_ARTICLE_MISMATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\ba\s+[aeiou]\w*\b|\ban\s+[^aeiou\s\W]\w*\b").unwrap());

/// Plural pronoun with a singular copula, or the reverse.
static COPULA_MISMATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(they|we|you)\s+(is|was)\b|\b(he|she|it)\s+(are|were)\b").unwrap());

/// "have/has/had" followed by the bare form of a common irregular verb
/// where a past participle is expected.
static HAVE_BARE_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(have|has|had)\s+(go|come|see|do|eat|write|take|buy|begin|break|choose|drink|drive|fall|fly|forget|give|know|ride|rise|run|sing|speak|steal|swim|wear)\b",
    )
    .unwrap()
});

/// Run the grammatical check for `category` against a lowercased sentence.
///
/// Categories without a dedicated check return true: the match stands on
/// its own.
pub fn check(category: ErrorCategory, sentence: &str) -> bool {
    match category {
        ErrorCategory::Article => INDEFINITE_ARTICLE_MISMATCH.is_match(sentence),
        ErrorCategory::SubjectVerbAgreement => COPULA_MISMATCH.is_match(sentence),
        ErrorCategory::Tense => HAVE_BARE_VERB.is_match(sentence),
        _ => true,
    }
}
