//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use rust_decimal::Decimal;

// =============================================================================
// User
// =============================================================================

/// Minimum age, in years, a user must have reached
pub const MIN_USER_AGE_YEARS: u32 = 18;

/// Upper bound (inclusive) for a user's base salary
pub const MAX_BASE_SALARY: Decimal = Decimal::from_parts(15_000_000, 0, 0, false, 0);

// =============================================================================
// Validation
// =============================================================================

/// Pattern an email must match once trimmed and lower-cased
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Pattern a phone number must match once trimmed
pub const PHONE_PATTERN: &str = r"^[0-9]+$";

/// Longest phone number accepted at the request boundary
pub const MAX_PHONE_DIGITS: usize = 15;
