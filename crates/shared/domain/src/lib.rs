//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Every invariant on a user record is enforced here, at construction time.

pub mod constants;
pub mod error;
pub mod user;
pub mod value_objects;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{User, UserProps};
pub use value_objects::{Email, PhoneNumber};
