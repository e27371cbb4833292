use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The 11 error categories a rule can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Tense,
    SubjectVerbAgreement,
    Article,
    Plurals,
    Preposition,
    WordChoice,
    Spelling,
    Punctuation,
    Structure,
    Grammar,
    Unknown,
}

impl ErrorCategory {
    /// Total number of categories.
    pub const COUNT: usize = 11;

    /// All variants for iteration.
    pub const ALL: [ErrorCategory; 11] = [
        Self::Tense,
        Self::SubjectVerbAgreement,
        Self::Article,
        Self::Plurals,
        Self::Preposition,
        Self::WordChoice,
        Self::Spelling,
        Self::Punctuation,
        Self::Structure,
        Self::Grammar,
        Self::Unknown,
    ];

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tense => "Verb tense",
            Self::SubjectVerbAgreement => "Subject-verb agreement",
            Self::Article => "Article usage",
            Self::Plurals => "Singular/plural forms",
            Self::Preposition => "Preposition usage",
            Self::WordChoice => "Word choice",
            Self::Spelling => "Spelling",
            Self::Punctuation => "Punctuation",
            Self::Structure => "Sentence structure",
            Self::Grammar => "General grammar",
            Self::Unknown => "Uncategorized",
        }
    }

    /// Wire/storage identifier (snake_case, matches the serde form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tense => "tense",
            Self::SubjectVerbAgreement => "subject_verb_agreement",
            Self::Article => "article",
            Self::Plurals => "plurals",
            Self::Preposition => "preposition",
            Self::WordChoice => "word_choice",
            Self::Spelling => "spelling",
            Self::Punctuation => "punctuation",
            Self::Structure => "structure",
            Self::Grammar => "grammar",
            Self::Unknown => "unknown",
        }
    }

    /// Categories whose new rules start with a trust bonus: mistakes in
    /// these categories are specific enough that a single reviewer report
    /// is strong evidence.
    pub fn is_high_precision(&self) -> bool {
        matches!(
            self,
            Self::SubjectVerbAgreement | Self::Tense | Self::Preposition
        )
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tense" => Ok(Self::Tense),
            "subject_verb_agreement" => Ok(Self::SubjectVerbAgreement),
            "article" => Ok(Self::Article),
            "plurals" => Ok(Self::Plurals),
            "preposition" => Ok(Self::Preposition),
            "word_choice" => Ok(Self::WordChoice),
            "spelling" => Ok(Self::Spelling),
            "punctuation" => Ok(Self::Punctuation),
            "structure" => Ok(Self::Structure),
            "grammar" => Ok(Self::Grammar),
            "unknown" => Ok(Self::Unknown),
            _ => Err(()),
        }
    }
}
