//! Normalised email addresses.
//!
//! Both the identity store and the registration ledger key on email, so a
//! single type owns normalisation: surrounding whitespace is trimmed and the
//! whole address is lowercased. Two inputs that differ only in case or
//! padding therefore compare equal and collide on the storage uniqueness
//! constraints.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum accepted length for an email address, after trimming.
pub const EMAIL_MAX: usize = 254;

/// Validation errors raised by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    Empty,
    TooLong { max: usize },
    InvalidFormat,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email is required"),
            Self::TooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidFormat => write!(f, "please provide a valid email address"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and at least one dot in the domain part.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Trimmed, lowercased email address.
///
/// # Examples
/// ```
/// use jobboard::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(EmailValidationError::InvalidFormat);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Normalisation and format coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@example.com", "a@example.com")]
    #[case("  A@Example.com\t", "a@example.com")]
    #[case("R@X.COM", "r@x.com")]
    fn normalises_case_and_padding(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), expected);
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("   ", EmailValidationError::Empty)]
    #[case("no-at-sign.com", EmailValidationError::InvalidFormat)]
    #[case("two@@example.com", EmailValidationError::InvalidFormat)]
    #[case("a b@example.com", EmailValidationError::InvalidFormat)]
    #[case("a@localhost", EmailValidationError::InvalidFormat)]
    fn rejects_invalid_input(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_addresses() {
        let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
        assert_eq!(
            EmailAddress::new(raw),
            Err(EmailValidationError::TooLong { max: EMAIL_MAX })
        );
    }

    #[rstest]
    fn differently_cased_inputs_compare_equal() {
        let upper = EmailAddress::new("Someone@Example.com").expect("valid");
        let lower = EmailAddress::new("someone@example.com").expect("valid");
        assert_eq!(upper, lower);
    }

    #[rstest]
    fn deserialisation_normalises() {
        let email: EmailAddress =
            serde_json::from_str("\" Mixed@Case.io \"").expect("deserialise email");
        assert_eq!(email.as_ref(), "mixed@case.io");
    }
}
