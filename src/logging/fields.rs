//! Field extraction helpers for structured logging

use crate::bot::TurnError;

const PREVIEW_CHARS: usize = 100;

/// Privacy-safe preview of user-supplied text.
///
/// Returns `None` unless content logging is enabled. Otherwise returns the
/// first 100 characters, with `...` appended when the text was cut.
///
/// # Examples
///
/// ```
/// use costbot::logging::preview_text;
///
/// assert_eq!(preview_text("What did we spend?", false), None);
/// assert_eq!(preview_text("What did we spend?", true).as_deref(), Some("What did we spend?"));
/// ```
pub fn preview_text(text: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || text.is_empty() {
        return None;
    }
    Some(truncate_chars(text, PREVIEW_CHARS))
}

/// Outcome label and error message for a finished turn.
///
/// - For Ok results: ("success", None)
/// - For Err results: (error kind, Some(error message))
pub fn reply_outcome<T>(result: &Result<T, TurnError>) -> (&'static str, Option<String>) {
    match result {
        Ok(_) => ("success", None),
        Err(e) => (e.kind(), Some(e.to_string())),
    }
}

/// Cut on a char boundary so multi-byte text never panics.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}
