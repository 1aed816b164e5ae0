//! Translation between commands, the `User` aggregate and responses.

use common::{AppError, AppResult};
use domain::{DomainError, Email, PhoneNumber, User, UserProps};

use super::dto::{CreateUserCommand, UpdateUserCommand, UserResponse};

fn mapping_failed(err: DomainError) -> AppError {
    AppError::validation(format!("User validation failed: {}", err))
}

fn build(props: UserProps) -> AppResult<User> {
    User::create(props).map_err(mapping_failed)
}

fn phone(raw: Option<String>) -> AppResult<PhoneNumber> {
    PhoneNumber::new(raw.unwrap_or_default()).map_err(mapping_failed)
}

fn email(raw: Option<String>) -> AppResult<Email> {
    Email::new(raw.unwrap_or_default()).map_err(mapping_failed)
}

/// Build a new user carrying `id`.
pub fn create_command_to_user(command: CreateUserCommand, id: String) -> AppResult<User> {
    build(UserProps {
        id: Some(id),
        name: command.name,
        last_name: command.last_name,
        address: command.address,
        phone_number: Some(phone(command.phone_number)?),
        birth_date: command.birth_date,
        email: Some(email(command.email)?),
        base_salary: command.base_salary,
        id_number: command.id_number,
    })
}

/// Build the replacement for an existing user, keeping the command's id.
pub fn update_command_to_user(command: UpdateUserCommand) -> AppResult<User> {
    build(UserProps {
        id: Some(command.id),
        name: command.name,
        last_name: command.last_name,
        address: command.address,
        phone_number: Some(phone(command.phone_number)?),
        birth_date: command.birth_date,
        email: Some(email(command.email)?),
        base_salary: command.base_salary,
        id_number: command.id_number,
    })
}

pub fn to_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id().unwrap_or_default().to_string(),
        name: user.name().to_string(),
        last_name: user.last_name().to_string(),
        address: user.address().map(str::to_string),
        phone_number: user.phone_number().value().to_string(),
        birth_date: user.birth_date(),
        email: user.email().value().to_string(),
        base_salary: user.base_salary(),
        id_number: user.id_number().to_string(),
    }
}

pub fn to_responses(users: &[User]) -> Vec<UserResponse> {
    users.iter().map(to_response).collect()
}
