use tracing::debug;

use super::scorer::CandidateScores;
use super::SummaryMode;

/// Pick the top-K scored sentences for the mode and restore reading order.
///
/// Ranking is fully ordered before truncation: score descending, then
/// original index ascending for equal scores. No map iteration order can
/// leak into the result. The returned indices are sorted ascending -
/// selection order by score must never survive into the final output.
pub fn select_top_sentences(
    scores: &CandidateScores,
    mode: SummaryMode,
    sentence_count: usize,
) -> Vec<usize> {
    let target = mode.selection_count(sentence_count);

    let mut ranked: Vec<(usize, u64)> = scores.iter().map(|(&index, &score)| (index, score)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(target);

    let mut selected: Vec<usize> = ranked.into_iter().map(|(index, _)| index).collect();
    selected.sort_unstable();

    debug!(
        requested = target,
        selected = selected.len(),
        mode = mode.as_str(),
        "selected sentences"
    );
    selected
}
