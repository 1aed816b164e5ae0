//! User use-case: existence checks, not-found and conflict decisions.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};

use super::dto::{CreateUserCommand, UpdateUserCommand, UserResponse};
use super::mapper;
use crate::repository::UserRepository;

/// User operations exposed to the API layer.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user under a freshly generated id
    async fn create_user(&self, command: CreateUserCommand) -> AppResult<UserResponse>;

    /// Replace every field of an existing user
    async fn update_user(&self, command: UpdateUserCommand) -> AppResult<UserResponse>;

    async fn get_all_users(&self) -> AppResult<Vec<UserResponse>>;

    async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse>;

    /// Remove a user, failing with not-found when it does not exist
    async fn delete_user(&self, id: &str) -> AppResult<()>;

    async fn get_user_by_email(&self, email: &str) -> AppResult<UserResponse>;

    async fn get_user_by_id_number(&self, id_number: &str) -> AppResult<UserResponse>;
}

/// [`UserService`] backed by a [`UserRepository`].
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_unique(&self, command: &CreateUserCommand) -> AppResult<()> {
        let email = normalize_email(command.email.as_deref().unwrap_or_default());
        let id_number = command.id_number.as_deref().unwrap_or_default().trim();

        // Nothing to look up; mapping reports the missing email
        if email.is_empty() && id_number.is_empty() {
            return Ok(());
        }

        let (exists, message) = if id_number.is_empty() {
            (
                self.repo.exists_by_email(&email).await?,
                format!("User already exists with email: {}", email),
            )
        } else {
            (
                self.repo.exists_by_email_or_id_number(&email, id_number).await?,
                format!(
                    "User already exists with email: {} or ID number: {}",
                    email, id_number
                ),
            )
        };

        if exists {
            tracing::warn!(%email, %id_number, "Rejected duplicate user");
            return Err(AppError::conflict(message));
        }
        Ok(())
    }
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn missing(message: String) -> String {
    tracing::warn!("{}", message);
    message
}

fn require(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, command: CreateUserCommand) -> AppResult<UserResponse> {
        tracing::debug!(email = ?command.email, "Creating user");
        self.ensure_unique(&command).await?;

        let user = mapper::create_command_to_user(command, Uuid::new_v4().to_string())?;
        let saved = self.repo.save(user).await?;

        tracing::info!(user_id = ?saved.id(), "User created");
        Ok(mapper::to_response(&saved))
    }

    async fn update_user(&self, mut command: UpdateUserCommand) -> AppResult<UserResponse> {
        tracing::debug!(user_id = %command.id, "Updating user");
        let existing = self
            .repo
            .find_by_id(&command.id)
            .await?
            .ok_or_not_found(|| missing(format!("User not found with ID: {}", command.id)))?;

        let keeps_id_number = command
            .id_number
            .as_deref()
            .map_or(true, |n| n.trim().is_empty());
        if keeps_id_number {
            command.id_number = Some(existing.id_number().to_string());
        }

        let user = mapper::update_command_to_user(command)?;
        let saved = self.repo.save(user).await?;

        tracing::info!(user_id = ?saved.id(), "User updated");
        Ok(mapper::to_response(&saved))
    }

    async fn get_all_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.find_all().await?;
        tracing::debug!(count = users.len(), "Retrieved users");
        Ok(mapper::to_responses(&users))
    }

    async fn get_user_by_id(&self, id: &str) -> AppResult<UserResponse> {
        require(id, "User ID cannot be null or empty")?;

        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| missing(format!("User not found with ID: {}", id)))?;
        Ok(mapper::to_response(&user))
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        require(id, "User ID cannot be null or empty")?;

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| missing(format!("User not found with ID: {}", id)))?;
        self.repo.delete_by_id(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<UserResponse> {
        require(email, "Email cannot be null or empty")?;
        let email = normalize_email(email);

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_not_found(|| missing(format!("User not found with email: {}", email)))?;
        Ok(mapper::to_response(&user))
    }

    async fn get_user_by_id_number(&self, id_number: &str) -> AppResult<UserResponse> {
        require(id_number, "ID number cannot be null or empty")?;
        let id_number = id_number.trim();

        let user = self
            .repo
            .find_by_id_number(id_number)
            .await?
            .ok_or_not_found(|| missing(format!("User not found with ID number: {}", id_number)))?;
        Ok(mapper::to_response(&user))
    }
}
