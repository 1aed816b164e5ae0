//! Self-validating scalar wrappers.

mod email;
mod phone_number;

pub use email::Email;
pub use phone_number::PhoneNumber;
