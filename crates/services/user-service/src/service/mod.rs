//! Service layer - business logic.

pub mod dto;
pub mod mapper;
mod user_service;

pub use dto::{CreateUserCommand, UpdateUserCommand, UserResponse};
pub use user_service::{UserManager, UserService};
