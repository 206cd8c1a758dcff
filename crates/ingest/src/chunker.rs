//! Text chunking with boundary-aware splitting.
//!
//! Splits document text into bounded-size chunks, preferring to cut at a
//! code-fence marker, then a paragraph break, then a sentence end. A cut
//! candidate is only accepted when it lies past 30% of the target size into
//! the current window, so no pathologically tiny chunks are produced.

/// Default target chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Fraction of the target size a boundary must clear to be used as a cut.
const MIN_BOUNDARY_FRACTION: f64 = 0.3;

/// Split text into chunks, respecting code blocks and paragraphs.
///
/// Scans forward through `text` in windows of `target_size` bytes (snapped
/// to UTF-8 character boundaries). Within each window the cut point is, in
/// priority order: the last ``` fence, the last blank line, the last
/// sentence-ending ". " (cut placed after the period). When no boundary
/// qualifies the window is cut at `target_size` — a hard cut mid-token is
/// acceptable. Chunks are trimmed; empty ones are dropped.
///
/// Pure and total: empty input yields an empty vector, input shorter than
/// `target_size` yields a single trimmed chunk, and the scan always makes
/// forward progress.
pub fn chunk_text(text: &str, target_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let threshold = target_size as f64 * MIN_BOUNDARY_FRACTION;

    while start < text.len() {
        // Candidate end, snapped back to a valid char boundary
        let mut end = prev_boundary(text, (start + target_size).min(text.len()));

        // At the end of the text, just take what's left
        if start + target_size >= text.len() {
            let tail = text[start..].trim();
            if !tail.is_empty() {
                chunks.push(tail.to_string());
            }
            break;
        }

        let window = &text[start..end];

        // Try a code block boundary first (```)
        if let Some(pos) = window.rfind("```").filter(|&p| p as f64 > threshold) {
            end = start + pos;
        } else if window.contains("\n\n") {
            // Otherwise the last paragraph break, if far enough in
            if let Some(pos) = window.rfind("\n\n").filter(|&p| p as f64 > threshold) {
                end = start + pos;
            }
        } else if window.contains(". ") {
            // Otherwise the last sentence break; the period stays with the
            // preceding sentence
            if let Some(pos) = window.rfind(". ").filter(|&p| p as f64 > threshold) {
                end = start + pos + 1;
            }
        }

        let chunk = text[start..end].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        // Guaranteed forward progress even when `end` did not move
        start = next_boundary(text, end.max(start + 1));
    }

    chunks
}

/// Snap `idx` back to the nearest char boundary at or before it.
fn prev_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Snap `idx` forward to the nearest char boundary at or after it.
fn next_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_small_input_single_chunk() {
        assert_eq!(chunk_text("hello", 5000), vec!["hello".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk_text("", 5000).is_empty());
        assert!(chunk_text("   \n\n  ", 5000).is_empty());
    }

    #[test]
    fn test_forward_progress_with_leading_fence() {
        let text = format!("```{}", "x".repeat(4999));
        let chunks = chunk_text(&text, 100);
        assert!(!chunks.is_empty());
        // Every byte of input is accounted for
        let joined: String = chunks.concat();
        assert_eq!(strip_whitespace(&joined), strip_whitespace(&text));
    }

    #[test]
    fn test_paragraph_boundary_preferred_over_hard_cut() {
        // Paragraph break at 60% of the target size, no code fence
        let first = "a".repeat(600);
        let second = "b".repeat(600);
        let text = format!("{}\n\n{}", first, second);

        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks[0], first);
        assert_eq!(chunks[1], second);
    }

    #[test]
    fn test_sentence_boundary_keeps_period() {
        let first = format!("{}.", "a".repeat(500));
        let second = "b".repeat(600);
        let text = format!("{} {}", first, second);

        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks[0], first);
        assert!(chunks[0].ends_with('.'));
    }

    #[test]
    fn test_boundary_below_threshold_is_ignored() {
        // Paragraph break at 10% of target size: too early, expect a hard cut
        let text = format!("{}\n\n{}", "a".repeat(100), "b".repeat(2000));
        let chunks = chunk_text(&text, 1000);
        assert!(chunks[0].len() > 500, "chunk was cut too early: {}", chunks[0].len());
    }

    #[test]
    fn test_coverage_in_order() {
        let paragraph = format!("{}.\n\n", "word ".repeat(60));
        let text = paragraph.repeat(40);

        let chunks = chunk_text(&text, 1000);
        let joined: String = chunks.concat();
        assert_eq!(strip_whitespace(&joined), strip_whitespace(&text));

        // Sanity bound: splitting never explodes the chunk count
        assert!(chunks.len() <= text.len() / 300 + 1);
    }

    #[test]
    fn test_code_fence_preferred() {
        let text = format!(
            "{}\n\n{}```\nlet x = 1;\n```\n{}",
            "a".repeat(200),
            "b".repeat(300),
            "c".repeat(800)
        );
        let chunks = chunk_text(&text, 600);
        // The cut lands on the last fence in the window, not the earlier
        // paragraph break, and the fence opens the next chunk
        assert!(chunks[0].ends_with("let x = 1;"));
        assert!(chunks[1].starts_with("```"));
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        let text = "héllø wörld. ".repeat(500);
        let chunks = chunk_text(&text, 100);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.len() <= 120);
        }
    }

    #[test]
    fn test_hard_cut_without_boundaries() {
        let text = "x".repeat(2500);
        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[2].len(), 500);
    }
}
