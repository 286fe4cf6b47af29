//! Request input validation.
//!
//! Runs in the request layer before the service façade is called, so the
//! façade and repositories only ever see well-formed titles, texts and limits.

use chatkeep_types::error::ValidationError;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TEXT_CHARS: usize = 5000;

/// Message limit used when the query parameter is absent or out of range.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 20;
pub const MAX_MESSAGE_LIMIT: u32 = 100;

/// Trim surrounding whitespace and check the title length (1..=200 chars).
pub fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_TITLE_CHARS {
        return Err(ValidationError(format!(
            "Title length must be between 1 and {MAX_TITLE_CHARS}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Check the message text length (1..=5000 chars). Text is kept as sent.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len == 0 || len > MAX_TEXT_CHARS {
        return Err(ValidationError(format!(
            "Message length must be between 1 and {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

/// Resolve the `limit` query parameter.
///
/// Anything other than an integer in `1..=100` falls back to the default
/// instead of being rejected.
pub fn resolve_limit(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|v| (1..=MAX_MESSAGE_LIMIT).contains(v))
        .unwrap_or(DEFAULT_MESSAGE_LIMIT)
}
