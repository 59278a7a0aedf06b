//! Text normalization helpers shared across the pipeline.

/// Truncates `text` to at most `max_chars` characters, appending an ellipsis
/// marker when content was dropped.
///
/// Counts characters rather than bytes, so multi-byte input is never split
/// mid-character.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut truncated = text[..cut].to_string();
            truncated.push('…');
            truncated
        }
    }
}
