//! Text utilities shared across the prompt pipeline.

/// Bound a prompt payload to `max_chars` characters.
///
/// Returns the text unchanged when it fits; otherwise the first `max_chars`
/// characters followed by `marker` (a localized truncation notice — see
/// [`crate::locale::truncation_marker`]). This is the single mechanism
/// bounding every prompt-bound payload; callers apply it at most once per
/// payload per turn.
pub fn clip(text: &str, max_chars: usize, marker: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(marker);
    out
}
