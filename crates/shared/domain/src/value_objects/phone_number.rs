//! Phone number value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::PHONE_PATTERN;
use crate::error::{DomainError, DomainResult};

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

/// A phone number made only of ASCII digits.
///
/// No separators and no leading `+`. Length is not capped here; the request
/// layer applies its own ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate a raw phone number, keeping the trimmed digits.
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_format("Phone number must have a value"));
        }

        if !PHONE_REGEX.is_match(trimmed) {
            return Err(DomainError::invalid_format(format!(
                "Phone number must contain only numbers: {}",
                raw
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
