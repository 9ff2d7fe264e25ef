// WHY: DFA-based boundary scan keeps segmentation O(n) over the input bytes
// Pattern [.!?]\s+ - terminal punctuation stays with the sentence, the
// whitespace run is the delimiter

use anyhow::Result;
use regex_automata::{
    dfa::{dense::DFA, Automaton},
    Input,
};
use tracing::debug;

/// A sentence extracted from the source text, borrowed from the segmented
/// input and tagged with its position in the original reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Zero-based position in the ordered sequence; stable, never reassigned.
    pub index: usize,
    /// Trimmed sentence text, terminal punctuation included.
    pub text: &'a str,
}

/// Splits text into sentences at boundaries following `.`, `!`, or `?` when
/// the mark is immediately followed by whitespace.
///
/// The segmenter is intentionally naive: it has no awareness of
/// abbreviations, decimal numbers, or quotations and will over- or
/// under-segment such text.
pub struct SentenceSegmenter {
    /// Compiled DFA for the sentence boundary pattern.
    dfa: DFA<Vec<u32>>,
}

impl SentenceSegmenter {
    const BOUNDARY_PATTERN: &'static str = r"[.!?]\s+";

    /// Compile the boundary DFA.
    pub fn new() -> Result<Self> {
        let dfa = DFA::new(Self::BOUNDARY_PATTERN)?;
        debug!("compiled boundary DFA with pattern: {}", Self::BOUNDARY_PATTERN);
        Ok(Self { dfa })
    }

    /// Split `text` into the ordered sequence of trimmed sentences.
    ///
    /// Callers are expected to pass pre-trimmed text; leading or trailing
    /// whitespace only produces extra empty pieces, which are dropped.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let mut sentences: Vec<Sentence<'a>> = Vec::new();
        let mut sentence_start = 0usize;
        let mut search_pos = 0usize;

        while search_pos < text.len() {
            let input = Input::new(text).range(search_pos..);
            let half = match self.dfa.try_search_fwd(&input) {
                Ok(Some(half)) => half,
                _ => break,
            };

            // Extend over any whitespace the match did not swallow so the
            // next sentence starts on a non-whitespace character.
            let mut boundary_end = half.offset();
            while let Some(ch) = text[boundary_end..].chars().next() {
                if !ch.is_whitespace() {
                    break;
                }
                boundary_end += ch.len_utf8();
            }

            // The sentence ends right after its punctuation mark, which is
            // the last non-whitespace byte before the delimiter run.
            let sentence_end = text[..boundary_end].trim_end().len();
            let piece = text[sentence_start..sentence_end].trim();
            if !piece.is_empty() {
                sentences.push(Sentence {
                    index: sentences.len(),
                    text: piece,
                });
            }

            sentence_start = boundary_end;
            search_pos = boundary_end;
        }

        // Whatever follows the last boundary is the final sentence.
        let tail = text[sentence_start..].trim();
        if !tail.is_empty() {
            sentences.push(Sentence {
                index: sentences.len(),
                text: tail,
            });
        }

        debug!("segmented {} sentences", sentences.len());
        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<String> {
        let segmenter = SentenceSegmenter::new().unwrap();
        segmenter
            .segment(text)
            .into_iter()
            .map(|s| s.text.to_string())
            .collect()
    }

    #[test]
    fn test_basic_segmentation() {
        let pieces = segment("Hello world. This is a test. How are you?");
        assert_eq!(pieces, vec!["Hello world.", "This is a test.", "How are you?"]);
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let pieces = segment("One! Two? Three.");
        assert_eq!(pieces, vec!["One!", "Two?", "Three."]);
    }

    #[test]
    fn test_no_boundary_single_sentence() {
        let pieces = segment("Only one sentence here");
        assert_eq!(pieces, vec!["Only one sentence here"]);
    }

    #[test]
    fn test_trailing_punctuation_without_whitespace() {
        // A final mark with nothing after it is not a boundary.
        let pieces = segment("First one. Second one.");
        assert_eq!(pieces, vec!["First one.", "Second one."]);
    }

    #[test]
    fn test_multi_whitespace_delimiter_consumed() {
        let pieces = segment("First.\n\nSecond.\t Third");
        assert_eq!(pieces, vec!["First.", "Second.", "Third"]);
    }

    #[test]
    fn test_decimal_number_is_not_a_boundary() {
        let pieces = segment("Pi is 3.14 roughly. Euler disagrees.");
        assert_eq!(pieces, vec!["Pi is 3.14 roughly.", "Euler disagrees."]);
    }

    #[test]
    fn test_abbreviations_oversegment() {
        // Naive by contract: abbreviations followed by whitespace do split.
        let pieces = segment("Dr. Smith arrived. He left.");
        assert_eq!(pieces, vec!["Dr.", "Smith arrived.", "He left."]);
    }

    #[test]
    fn test_indices_are_stable_and_ordered() {
        let segmenter = SentenceSegmenter::new().unwrap();
        let sentences = segmenter.segment("A one. B two. C three.");
        let indices: Vec<usize> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_unicode_text() {
        let pieces = segment("Grüße aus Berlin. 世界 is the world.");
        assert_eq!(pieces, vec!["Grüße aus Berlin.", "世界 is the world."]);
    }
}
