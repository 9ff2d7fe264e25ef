use super::SummaryMode;

/// Marker prefixed to every bullet line.
pub const BULLET_MARKER: &str = "\u{2022} ";

/// Render the selected sentences for the mode.
///
/// Bullet mode emits one line per sentence, trimmed, empties skipped, each
/// prefixed with the marker. Every other mode joins the sentences into one
/// paragraph with single spaces.
pub fn render(sentences: &[&str], mode: SummaryMode) -> String {
    match mode {
        SummaryMode::Bullet => sentences
            .iter()
            .map(|sentence| sentence.trim())
            .filter(|sentence| !sentence.is_empty())
            .map(|sentence| format!("{BULLET_MARKER}{sentence}"))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => sentences.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_join() {
        let rendered = render(&["One.", "Two.", "Three."], SummaryMode::Brief);
        assert_eq!(rendered, "One. Two. Three.");
    }

    #[test]
    fn test_bullet_lines() {
        let rendered = render(&["One.", "Two."], SummaryMode::Bullet);
        assert_eq!(rendered, "\u{2022} One.\n\u{2022} Two.");
    }

    #[test]
    fn test_bullet_skips_empty_after_trim() {
        let rendered = render(&["One.", "   ", "Two."], SummaryMode::Bullet);
        assert_eq!(rendered, "\u{2022} One.\n\u{2022} Two.");
    }

    #[test]
    fn test_empty_selection_renders_empty() {
        assert_eq!(render(&[], SummaryMode::Standard), "");
        assert_eq!(render(&[], SummaryMode::Bullet), "");
    }
}
