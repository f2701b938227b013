//! Small shared helpers: selector parsing, URL handling, text truncation.

mod selector;
mod url;

pub(crate) use selector::parse_selector_with_fallback;
pub(crate) use url::absolutize;

/// Compiles a regex pattern, panicking with a detailed error message if
/// compilation fails. Only for static patterns that are compile-time
/// constants.
pub(crate) fn compile_regex_unsafe(pattern: &str, context: &str) -> regex::Regex {
    regex::Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

/// Truncates a string to at most `max` characters (Unicode scalars).
///
/// Returns the input unchanged when it already fits, so truncation never
/// splits a multi-byte character.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_index, _)) => s[..byte_index].to_string(),
        None => s.to_string(),
    }
}
