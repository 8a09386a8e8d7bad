//! Cleanup for free-text fields before they reach the store.
//!
//! Player names and tournament name/year/sport are trimmed, length-checked,
//! and HTML-escaped so that a stored value is always safe to render.

use crate::error::SwissError;

/// Maximum length of a free-text field, in characters, before escaping.
pub const MAX_TEXT_CHARS: usize = 200;

/// Trim, validate, and HTML-escape a free-text field.
///
/// # Errors
///
/// Returns [`SwissError::InvalidInput`] if the trimmed value is empty or
/// longer than [`MAX_TEXT_CHARS`].
pub fn clean_text(field: &'static str, raw: &str) -> Result<String, SwissError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!(field, "Rejected empty text field");
        return Err(SwissError::InvalidInput {
            field,
            reason: String::from("must not be empty"),
        });
    }

    let chars = trimmed.chars().count();
    if chars > MAX_TEXT_CHARS {
        tracing::warn!(field, chars, "Rejected oversized text field");
        return Err(SwissError::InvalidInput {
            field,
            reason: format!("must be at most {MAX_TEXT_CHARS} characters, got {chars}"),
        });
    }

    Ok(escape_html(trimmed))
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
