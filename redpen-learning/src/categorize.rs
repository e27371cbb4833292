//! Error-category inference from a wrong/correct expression pair.
//!
//! A cascade of heuristic strategies evaluated in a fixed priority order;
//! the first strategy that recognizes the pair wins, and the fallback is
//! always `word_choice`.

use redpen_core::ErrorCategory;

/// Strategy evaluation order. The fallback when nothing matches is
/// [`ErrorCategory::WordChoice`].
pub const INFERENCE_ORDER: [ErrorCategory; 5] = [
    ErrorCategory::SubjectVerbAgreement,
    ErrorCategory::Tense,
    ErrorCategory::Article,
    ErrorCategory::Preposition,
    ErrorCategory::Spelling,
];

const PLURAL_PRONOUNS: &[&str] = &["they", "we", "you"];
const SINGULAR_PRONOUNS: &[&str] = &["he", "she", "it"];
const SINGULAR_COPULAS: &[&str] = &["is", "was"];
const PLURAL_COPULAS: &[&str] = &["are", "were"];

/// Over-regularized past forms and their irregular corrections.
const IRREGULAR_PAST_PAIRS: &[(&str, &str)] = &[
    ("buyed", "bought"),
    ("goed", "went"),
    ("comed", "came"),
    ("eated", "ate"),
    ("taked", "took"),
    ("maked", "made"),
    ("writed", "wrote"),
    ("runned", "ran"),
    ("teached", "taught"),
    ("catched", "caught"),
    ("thinked", "thought"),
    ("bringed", "brought"),
    ("falled", "fell"),
    ("feeled", "felt"),
    ("finded", "found"),
    ("getted", "got"),
    ("knowed", "knew"),
    ("speaked", "spoke"),
    ("swimmed", "swam"),
    ("breaked", "broke"),
];

const ARTICLES: &[&str] = &["a", "an", "the"];

const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "to", "of", "for", "by", "with", "from", "about", "into", "over", "under",
    "during", "between", "among", "through", "against", "without",
];

const AUXILIARIES: &[&str] = &["have", "has", "had"];

/// Infer the category of a wrong → correct pair.
pub fn infer_category(wrong: &str, correct: &str) -> ErrorCategory {
    let wrong = wrong.to_lowercase();
    let correct = correct.to_lowercase();

    for category in INFERENCE_ORDER {
        if strategy_matches(category, &wrong, &correct) {
            return category;
        }
    }
    ErrorCategory::WordChoice
}

fn strategy_matches(category: ErrorCategory, wrong: &str, correct: &str) -> bool {
    match category {
        ErrorCategory::SubjectVerbAgreement => agreement_mismatch(wrong),
        ErrorCategory::Tense => tense_mismatch(wrong, correct),
        ErrorCategory::Article => article_difference(wrong, correct),
        ErrorCategory::Preposition => preposition_difference(wrong, correct),
        ErrorCategory::Spelling => spelling_slip(wrong, correct),
        _ => false,
    }
}

/// Adjacent pronoun/copula pair with mismatched number in the wrong form.
fn agreement_mismatch(wrong: &str) -> bool {
    let tokens: Vec<&str> = wrong.split_whitespace().collect();
    tokens.windows(2).any(|pair| {
        (PLURAL_PRONOUNS.contains(&pair[0]) && SINGULAR_COPULAS.contains(&pair[1]))
            || (SINGULAR_PRONOUNS.contains(&pair[0]) && PLURAL_COPULAS.contains(&pair[1]))
    })
}

/// Known over-regularized past form, or an auxiliary followed by a verb
/// whose participle the correction supplies.
fn tense_mismatch(wrong: &str, correct: &str) -> bool {
    let wrong_tokens: Vec<&str> = wrong.split_whitespace().collect();
    let correct_tokens: Vec<&str> = correct.split_whitespace().collect();

    if wrong_tokens
        .iter()
        .any(|t| IRREGULAR_PAST_PAIRS.iter().any(|(w, _)| w == t))
    {
        return true;
    }
    if correct_tokens
        .iter()
        .any(|t| IRREGULAR_PAST_PAIRS.iter().any(|(_, c)| c == t))
        && wrong_tokens.iter().any(|t| t.ends_with("ed"))
    {
        return true;
    }
    // "have go" → "have gone" and friends.
    wrong_tokens
        .windows(2)
        .any(|pair| AUXILIARIES.contains(&pair[0]))
        && correct_tokens
            .windows(2)
            .any(|pair| AUXILIARIES.contains(&pair[0]) && pair[1] != wrong_tokens.last().copied().unwrap_or(""))
}

/// The two expressions differ only in article words.
fn article_difference(wrong: &str, correct: &str) -> bool {
    words_differ_only_within(wrong, correct, ARTICLES)
}

/// The two expressions differ only in preposition words.
fn preposition_difference(wrong: &str, correct: &str) -> bool {
    words_differ_only_within(wrong, correct, PREPOSITIONS)
}

/// Single-token slip within edit distance 2.
fn spelling_slip(wrong: &str, correct: &str) -> bool {
    let (w, c) = (wrong.trim(), correct.trim());
    if w.is_empty() || c.is_empty() || w == c {
        return false;
    }
    if w.split_whitespace().count() != 1 || c.split_whitespace().count() != 1 {
        return false;
    }
    levenshtein(w, c) <= 2
}

/// True when the symmetric difference of the two token sets is non-empty
/// and lies entirely within `vocabulary`.
fn words_differ_only_within(wrong: &str, correct: &str, vocabulary: &[&str]) -> bool {
    let wrong_tokens: Vec<&str> = wrong.split_whitespace().collect();
    let correct_tokens: Vec<&str> = correct.split_whitespace().collect();

    let only_in_wrong: Vec<&str> = wrong_tokens
        .iter()
        .filter(|t| !correct_tokens.contains(t))
        .copied()
        .collect();
    let only_in_correct: Vec<&str> = correct_tokens
        .iter()
        .filter(|t| !wrong_tokens.contains(t))
        .copied()
        .collect();

    if only_in_wrong.is_empty() && only_in_correct.is_empty() {
        return false;
    }
    only_in_wrong
        .iter()
        .chain(only_in_correct.iter())
        .all(|t| vocabulary.contains(t))
}

/// Classic dynamic-programming edit distance.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_order_is_fixed() {
        assert_eq!(
            INFERENCE_ORDER,
            [
                ErrorCategory::SubjectVerbAgreement,
                ErrorCategory::Tense,
                ErrorCategory::Article,
                ErrorCategory::Preposition,
                ErrorCategory::Spelling,
            ]
        );
    }

    #[test]
    fn infers_subject_verb_agreement() {
        assert_eq!(
            infer_category("they is", "they are"),
            ErrorCategory::SubjectVerbAgreement
        );
        assert_eq!(
            infer_category("he are", "he is"),
            ErrorCategory::SubjectVerbAgreement
        );
    }

    #[test]
    fn infers_tense_from_irregular_pairs() {
        assert_eq!(infer_category("buyed", "bought"), ErrorCategory::Tense);
        assert_eq!(infer_category("have go", "have gone"), ErrorCategory::Tense);
    }

    #[test]
    fn infers_article_from_symmetric_difference() {
        assert_eq!(
            infer_category("a apple", "an apple"),
            ErrorCategory::Article
        );
    }

    #[test]
    fn infers_preposition_from_symmetric_difference() {
        assert_eq!(
            infer_category("depend of", "depend on"),
            ErrorCategory::Preposition
        );
        assert_eq!(
            infer_category("arrive to school", "arrive at school"),
            ErrorCategory::Preposition
        );
    }

    #[test]
    fn infers_spelling_from_edit_distance() {
        assert_eq!(
            infer_category("recieve", "receive"),
            ErrorCategory::Spelling
        );
        assert_eq!(infer_category("freind", "friend"), ErrorCategory::Spelling);
    }

    #[test]
    fn falls_back_to_word_choice() {
        assert_eq!(
            infer_category("very delicious moment", "wonderful moment"),
            ErrorCategory::WordChoice
        );
    }

    #[test]
    fn agreement_wins_over_spelling() {
        // "they is" → "they are" is within edit distance 2, but the
        // agreement strategy runs first.
        assert_eq!(
            infer_category("they is", "they are"),
            ErrorCategory::SubjectVerbAgreement
        );
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("recieve", "receive"), 2);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }
}
