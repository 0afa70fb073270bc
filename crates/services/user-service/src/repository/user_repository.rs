//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{DomainError, PendingUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by exact email address
    async fn find_one_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user; the store assigns the id.
    ///
    /// A duplicate email is reported as the "Email exists!" conflict.
    async fn insert(&self, user: PendingUser) -> AppResult<User>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_one_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, user: PendingUser) -> AppResult<User> {
        let active_model = ActiveModel::from(user);

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(User::from(model))
    }
}

/// The unique index on `users.email` closes the check-then-insert race;
/// translate its violation into the same conflict the pre-check raises.
fn map_insert_error(err: DbErr) -> AppError {
    let sql_err = err.sql_err();
    map_sql_err(sql_err, err)
}

fn map_sql_err(sql_err: Option<SqlErr>, err: DbErr) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("Unique constraint violated on insert: {}", detail);
            AppError::from(DomainError::email_exists())
        }
        _ => AppError::from(err),
    }
}
