//! Input validation helpers

use crate::shared::error::SharedError;

/// Require `value` to hold between 1 and `max` characters, ignoring
/// surrounding whitespace when testing for emptiness.
pub fn text_length(field: &str, value: &str, max: usize) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(SharedError::validation(
            field,
            format!("must be at most {} characters (got {})", max, len),
        ));
    }
    Ok(())
}

/// Like [`text_length`] for optional fields; `None` passes.
pub fn optional_text_length(field: &str, value: Option<&str>, max: usize) -> Result<(), SharedError> {
    match value {
        Some(value) => text_length(field, value, max),
        None => Ok(()),
    }
}
