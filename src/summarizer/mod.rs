// WHY: linear pipeline with exactly one decision point (sentinel vs
// passthrough vs full scoring) and one mode-dependent branch (count, style)

use anyhow::Result;
use tracing::debug;

pub mod formatter;
pub mod scorer;
pub mod segmenter;
pub mod selector;
pub mod tokens;

// Re-export core types
pub use scorer::{CandidateScores, FrequencyScorer, WordFrequencyTable, MAX_CANDIDATE_WORDS};
pub use segmenter::{Sentence, SentenceSegmenter};
pub use tokens::{StopwordFilter, STOPWORDS};

/// Caller-visible result for empty or whitespace-only input.
pub const NO_TEXT_SENTINEL: &str = "No text to summarize.";

/// Verbosity/format preset controlling selection count and rendering style.
///
/// Unrecognized mode names fall back to [`SummaryMode::Standard`]; there is
/// no error path for a bad mode string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    /// Top 3 sentences, paragraph rendering.
    Brief,
    /// Up to 8 sentences, capped at half the document, paragraph rendering.
    Detailed,
    /// Top 7 sentences, one `• `-prefixed line each.
    Bullet,
    /// Fallback preset: top 4 sentences, paragraph rendering.
    Standard,
}

impl SummaryMode {
    /// Map a caller-supplied mode string to a preset.
    pub fn from_name(name: &str) -> Self {
        match name {
            "brief" => Self::Brief,
            "detailed" => Self::Detailed,
            "bullet" => Self::Bullet,
            _ => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
            Self::Bullet => "bullet",
            Self::Standard => "standard",
        }
    }

    /// Number of sentences to select from a document with `sentence_count`
    /// sentences in total.
    pub fn selection_count(&self, sentence_count: usize) -> usize {
        match self {
            Self::Brief => 3,
            Self::Detailed => 8.min(sentence_count / 2),
            Self::Bullet => 7,
            Self::Standard => 4,
        }
    }
}

/// Rendered summary plus the sentence counts behind it.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// The rendered output: sentinel, passthrough, or multi-sentence summary.
    pub text: String,
    pub mode: SummaryMode,
    /// Sentences found by segmentation.
    pub sentences_total: usize,
    /// Sentences contributing to the rendered output.
    pub sentences_selected: usize,
}

/// Extractive summarizer: a pure, stateless function of (text, mode).
///
/// Holds the compiled boundary DFA and the stopword filter; both are
/// immutable after construction, so one instance is safe to share across
/// threads and reuse across calls. Every call allocates and discards its
/// own frequency table, score map, and sentence sequence.
pub struct Summarizer {
    segmenter: SentenceSegmenter,
    scorer: FrequencyScorer,
}

impl Summarizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            segmenter: SentenceSegmenter::new()?,
            scorer: FrequencyScorer::new(),
        })
    }

    /// Summarize `text` for the mode, returning only the rendered string.
    pub fn summarize(&self, text: &str, mode: SummaryMode) -> String {
        self.summarize_outcome(text, mode).text
    }

    /// Summarize `text` for the mode, returning the rendered string together
    /// with sentence counts for stats reporting.
    pub fn summarize_outcome(&self, text: &str, mode: SummaryMode) -> SummaryOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SummaryOutcome {
                text: NO_TEXT_SENTINEL.to_string(),
                mode,
                sentences_total: 0,
                sentences_selected: 0,
            };
        }

        let sentences = self.segmenter.segment(trimmed);
        if sentences.len() <= 1 {
            // Single-clause input is returned unchanged; scoring and the
            // length cutoff never apply.
            return SummaryOutcome {
                text: trimmed.to_string(),
                mode,
                sentences_total: sentences.len(),
                sentences_selected: sentences.len(),
            };
        }

        let frequencies = self.scorer.word_frequencies(&sentences);
        let scores = self.scorer.score_sentences(&sentences, &frequencies);
        let selected = selector::select_top_sentences(&scores, mode, sentences.len());
        let chosen: Vec<&str> = selected.iter().map(|&index| sentences[index].text).collect();

        debug!(
            total = sentences.len(),
            selected = chosen.len(),
            mode = mode.as_str(),
            "summarization complete"
        );

        SummaryOutcome {
            text: formatter::render(&chosen, mode),
            mode,
            sentences_total: sentences.len(),
            sentences_selected: chosen.len(),
        }
    }
}

/// One-shot convenience for callers holding a raw mode string.
pub fn summarize_text(text: &str, mode: &str) -> Result<String> {
    let summarizer = Summarizer::new()?;
    Ok(summarizer.summarize(text, SummaryMode::from_name(mode)))
}
