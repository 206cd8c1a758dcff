//! HTML to plain-text conversion.

/// Render width used for the text layout.
const RENDER_WIDTH: usize = 80;

/// Convert rendered HTML to plain text.
///
/// Link targets are preserved in the output, block elements are separated
/// by blank lines, and script/style content is dropped, so the chunker's
/// paragraph-boundary preference applies naturally. Conversion failures
/// produce an empty string, which the crawl treats as an empty page and
/// skips.
pub fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), RENDER_WIDTH)
}
