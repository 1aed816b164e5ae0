//! Email value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::EMAIL_PATTERN;
use crate::error::{DomainError, DomainResult};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// A syntactically valid email address, stored trimmed and lower-cased.
///
/// Equality and hashing use the normalized value, so `" A@B.CO "` and
/// `"a@b.co"` are the same email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalize a raw email.
    ///
    /// The format error quotes `raw` exactly as it was received.
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(DomainError::invalid_format("Email must have a value"));
        }

        let normalized = raw.trim().to_lowercase();
        if !Self::is_valid_format(&normalized) {
            return Err(DomainError::invalid_format(format!(
                "Email does not have a valid format: {}",
                raw
            )));
        }

        Ok(Self(normalized))
    }

    /// Check a candidate against the email pattern without building a value.
    pub fn is_valid_format(candidate: &str) -> bool {
        EMAIL_REGEX.is_match(candidate)
    }

    /// The normalized address.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Everything after the first `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }

    /// Everything before the first `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::new("  John.Doe@Example.COM ").unwrap();
        assert_eq!(email.value(), "john.doe@example.com");
    }

    #[test]
    fn exposes_local_part_and_domain() {
        let email = Email::new("steven.garcia@test.com").unwrap();
        assert_eq!(email.local_part(), "steven.garcia");
        assert_eq!(email.domain(), "test.com");
    }

    #[test]
    fn equality_uses_normalized_value() {
        assert_eq!(Email::new("A@B.CO").unwrap(), Email::new("a@b.co").unwrap());
    }

    #[test]
    fn rejects_blank_input() {
        for raw in ["", "   ", "\t\n"] {
            let err = Email::new(raw).unwrap_err();
            assert_eq!(err, DomainError::invalid_format("Email must have a value"));
        }
    }

    #[test]
    fn format_error_quotes_original_input() {
        let err = Email::new(" not-an-email ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Email does not have a valid format:  not-an-email "
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user name@example.com",
            "user@exa mple.com",
        ] {
            assert!(Email::new(raw).is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn accepts_common_addresses() {
        for raw in ["a@b.co", "first.last+tag@sub.domain.org", "x_y%z@host-1.io"] {
            assert!(Email::new(raw).is_ok(), "{} should be accepted", raw);
        }
    }
}
