//! Repository port for user account persistence.

use crate::auth::domain::{Email, UserAccount, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User account persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already registered or [`UserRepositoryError::DuplicateUser`] when the
    /// identifier already exists.
    async fn store(&self, account: &UserAccount) -> UserRepositoryResult<()>;

    /// Finds an account by its login email.
    ///
    /// Returns `None` when no account uses the email.
    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<UserAccount>>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<UserAccount>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// An account with the same email already exists.
    #[error("email already registered: {0}")]
    DuplicateEmail(Email),

    /// An account with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
