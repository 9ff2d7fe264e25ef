// WHY: two-pass design - global frequencies must be complete before any
// sentence can be scored against them

use std::collections::HashMap;
use tracing::debug;

use super::segmenter::Sentence;
use super::tokens::StopwordFilter;

/// Sentences with this many whitespace-delimited words or more never become
/// selection candidates. They still contribute to global frequencies.
pub const MAX_CANDIDATE_WORDS: usize = 30;

/// Corpus-wide word -> occurrence count table, built once per call.
pub type WordFrequencyTable = HashMap<String, u64>;

/// Accumulated score per original sentence index. Only candidates appear:
/// a sentence with no surviving tokens never receives an entry.
pub type CandidateScores = HashMap<usize, u64>;

/// Frequency-based sentence scorer.
#[derive(Debug, Clone, Default)]
pub struct FrequencyScorer {
    filter: StopwordFilter,
}

impl FrequencyScorer {
    pub fn new() -> Self {
        Self {
            filter: StopwordFilter::new(),
        }
    }

    /// Pass 1: count every surviving token across the entire document.
    ///
    /// All sentences contribute here, including those too long to become
    /// candidates in pass 2.
    pub fn word_frequencies(&self, sentences: &[Sentence<'_>]) -> WordFrequencyTable {
        let mut frequencies = WordFrequencyTable::new();
        for sentence in sentences {
            let lowered = sentence.text.to_lowercase();
            for token in self.filter.content_tokens(&lowered) {
                *frequencies.entry(token.to_string()).or_insert(0) += 1;
            }
        }
        debug!(distinct_words = frequencies.len(), "built word frequency table");
        frequencies
    }

    /// Pass 2: score each eligible sentence as the sum of its surviving
    /// tokens' global frequencies, once per occurrence.
    ///
    /// A token repeated within one sentence contributes its global frequency
    /// each time - the heuristic deliberately rewards repetition.
    pub fn score_sentences(
        &self,
        sentences: &[Sentence<'_>],
        frequencies: &WordFrequencyTable,
    ) -> CandidateScores {
        let mut scores = CandidateScores::new();
        for sentence in sentences {
            if sentence.text.split_whitespace().count() >= MAX_CANDIDATE_WORDS {
                continue;
            }
            let lowered = sentence.text.to_lowercase();
            for token in self.filter.content_tokens(&lowered) {
                if let Some(count) = frequencies.get(token) {
                    *scores.entry(sentence.index).or_insert(0) += count;
                }
            }
        }
        debug!(candidates = scores.len(), "scored candidate sentences");
        scores
    }
}
