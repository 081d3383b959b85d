//! Shared rules for user-supplied free text.
//!
//! Titles, company names, locations, descriptions, and display names all
//! follow the same shape: trimmed, bounded length counted in characters, and
//! no angle brackets.

/// Failure modes for [`free_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FreeTextError {
    TooShort { min: usize },
    TooLong { max: usize },
    AngleBrackets,
}

/// Trim `raw` and check it against the bounds.
pub(crate) fn free_text(raw: &str, min: usize, max: usize) -> Result<String, FreeTextError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length < min {
        return Err(FreeTextError::TooShort { min });
    }
    if length > max {
        return Err(FreeTextError::TooLong { max });
    }
    if trimmed.contains(['<', '>']) {
        return Err(FreeTextError::AngleBrackets);
    }
    Ok(trimmed.to_owned())
}

/// Like [`free_text`] but maps blank input to `None`.
pub(crate) fn optional_free_text(
    raw: Option<&str>,
    max: usize,
) -> Result<Option<String>, FreeTextError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => free_text(value, 1, max).map(Some),
    }
}
