//! User gateway and its SeaORM implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence port the use-case depends on.
///
/// Every operation may fail with a persistence error, which callers pass
/// through untouched.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or overwrite, decided by whether the id is already stored
    async fn save(&self, user: User) -> AppResult<User>;

    /// All stored users, in no particular order
    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    async fn find_by_id_number(&self, id_number: &str) -> AppResult<Option<User>>;

    /// True when either key matches a stored user. Blank keys are ignored,
    /// but at least one must be given.
    async fn exists_by_email_or_id_number(&self, email: &str, id_number: &str)
        -> AppResult<bool>;
}

/// Postgres-backed [`UserRepository`].
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> AppError {
    let sql_err = err.sql_err();
    classify_db_err(err, sql_err)
}

/// Unique-key violations become conflicts so a lost check-then-insert race
/// still reads as "already exists".
fn classify_db_err(err: DbErr, sql_err: Option<SqlErr>) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!(%detail, "Unique constraint violated on users");
            AppError::conflict("User already exists with the same email or ID number")
        }
        _ => AppError::Database(err),
    }
}

fn to_domain(model: user::Model) -> AppResult<User> {
    let id = model.id.clone();
    User::try_from(model).map_err(|e| {
        AppError::internal(format!("Stored user {} violates domain rules: {}", id, e))
    })
}

fn require_key(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: User) -> AppResult<User> {
        let id = user
            .id()
            .map(str::to_string)
            .ok_or_else(|| AppError::internal("Cannot persist a user without an id"))?;
        tracing::debug!(user_id = %id, "Attempting to save user");

        let exists = UserEntity::find_by_id(id.clone())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .is_some();

        let active = ActiveModel::from_user(id, &user);
        let model = if exists {
            active.update(&*self.db).await
        } else {
            active.insert(&*self.db).await
        }
        .map_err(map_db_err)?;

        tracing::debug!(user_id = %model.id, updated = exists, "Saved user");
        to_domain(model)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        tracing::debug!("Retrieving all users");
        let models = UserEntity::find().all(&*self.db).await.map_err(map_db_err)?;

        models.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        require_key(id, "User ID cannot be null or empty")?;
        tracing::debug!(user_id = %id, "Finding user by id");

        UserEntity::find_by_id(id.to_string())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        require_key(email, "Email cannot be null or empty")?;
        tracing::debug!(%email, "Finding user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_domain)
            .transpose()
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        require_key(email, "Email cannot be null or empty")?;

        let exists = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .is_some();

        tracing::debug!(%email, exists, "Checked user existence by email");
        Ok(exists)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        require_key(id, "User ID cannot be null or empty")?;

        UserEntity::delete_by_id(id.to_string())
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(user_id = %id, "Deleted user");
        Ok(())
    }

    async fn find_by_id_number(&self, id_number: &str) -> AppResult<Option<User>> {
        require_key(id_number, "ID number cannot be null or empty")?;
        tracing::debug!(%id_number, "Finding user by ID number");

        UserEntity::find()
            .filter(user::Column::IdentityNumber.eq(id_number))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_domain)
            .transpose()
    }

    async fn exists_by_email_or_id_number(
        &self,
        email: &str,
        id_number: &str,
    ) -> AppResult<bool> {
        let has_email = !email.trim().is_empty();
        let has_id_number = !id_number.trim().is_empty();
        if !has_email && !has_id_number {
            return Err(AppError::validation(
                "Either email or ID number must be provided",
            ));
        }

        let condition = Condition::any()
            .add_option(has_email.then(|| user::Column::Email.eq(email)))
            .add_option(has_id_number.then(|| user::Column::IdentityNumber.eq(id_number)));

        let exists = UserEntity::find()
            .filter(condition)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .is_some();

        tracing::debug!(%email, %id_number, exists, "Checked user existence by email or ID number");
        Ok(exists)
    }
}
