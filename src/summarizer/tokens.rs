// WHY: the stopword table is a fixed constant - corpus frequencies are only
// comparable across runs when the exact same function words are dropped

use std::collections::HashSet;

/// Common English function words and pronouns excluded from frequency
/// scoring, including a handful of contraction remnants (`s`, `t`, `don`).
pub static STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
    "with", "by", "is", "are", "was", "were", "been", "be", "have", "has",
    "had", "do", "does", "did", "will", "would", "could", "should", "may",
    "might", "can", "this", "that", "these", "those", "i", "you", "he", "she",
    "it", "we", "they", "what", "which", "who", "when", "where", "why", "how",
    "all", "each", "few", "more", "most", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "just",
    "don", "now",
];

/// Splits lowercased text into maximal runs of alphanumeric/underscore
/// characters. Everything else, punctuation and symbols included, separates
/// tokens and is dropped.
pub fn word_tokens(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| !token.is_empty())
}

/// Filter over the fixed stopword table.
///
/// The set is built once at construction and never mutated.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<&'static str>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordFilter {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Tokens of an already-lowercased sentence that survive the filter,
    /// duplicates retained, order preserved.
    pub fn content_tokens<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        word_tokens(lowered).filter(move |token| !self.is_stopword(token))
    }
}
