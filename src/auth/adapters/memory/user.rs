//! In-memory account repository for tests and database-less deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::auth::{
    domain::{Email, UserAccount, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory account repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    accounts: HashMap<UserId, UserAccount>,
    email_index: HashMap<Email, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, account: &UserAccount) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.accounts.contains_key(account.id()) {
            return Err(UserRepositoryError::DuplicateUser(account.id().clone()));
        }
        if state.email_index.contains_key(account.email()) {
            return Err(UserRepositoryError::DuplicateEmail(account.email().clone()));
        }

        state
            .email_index
            .insert(account.email().clone(), account.id().clone());
        state
            .accounts
            .insert(account.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let account = state
            .email_index
            .get(email)
            .and_then(|id| state.accounts.get(id))
            .cloned();
        Ok(account)
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<UserAccount>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.accounts.get(id).cloned())
    }
}
