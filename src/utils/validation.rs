//! Input validation primitives for prompt answers.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, Some(value.to_string()), None))
    } else {
        Ok(trimmed)
    }
}

/// Require a name to contain at least one letter or digit.
///
/// Names made only of punctuation would derive empty identifiers.
pub fn require_identifier_chars<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = require_non_empty(value, field, &format!("{} cannot be empty", field))?;
    if !trimmed.chars().any(char::is_alphanumeric) {
        return Err(Error::validation_invalid_argument(
            field,
            format!("{} must contain at least one letter or number", field),
            Some(value.to_string()),
            None,
        ));
    }
    Ok(trimmed)
}

/// Require the first letter or digit of a name to be a letter.
///
/// Names that become JavaScript or Python identifiers cannot start with a digit.
pub fn require_letter_first<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    match value.chars().find(|c| c.is_alphanumeric()) {
        Some(c) if c.is_alphabetic() => Ok(value),
        _ => Err(Error::validation_invalid_argument(
            field,
            format!("{} must start with a letter", field),
            Some(value.to_string()),
            None,
        )),
    }
}
