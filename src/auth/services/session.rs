//! Registration, login, and bearer-token authentication.

use super::tokens::{IssuedToken, SessionTokens, TokenError};
use crate::auth::{
    domain::{AuthDomainError, Email, PasswordHash, Principal, Role, UserAccount},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Email and password submitted to register or log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Service-level errors for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AuthDomainError),

    /// The email is unknown or the password does not match.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Token issue or verification failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for authentication service operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Account registration and session issuing service.
pub struct AuthService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    tokens: SessionTokens<C>,
    clock: Arc<C>,
    admin_emails: HashSet<Email>,
}

impl<R, C> AuthService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new authentication service.
    #[must_use]
    pub fn new(repository: Arc<R>, tokens: SessionTokens<C>, clock: Arc<C>) -> Self {
        Self {
            repository,
            tokens,
            clock,
            admin_emails: HashSet::new(),
        }
    }

    /// Grants the [`Role::Admin`] role to accounts registered with any of
    /// `emails`.
    #[must_use]
    pub fn with_admin_emails(mut self, emails: impl IntoIterator<Item = Email>) -> Self {
        self.admin_emails = emails.into_iter().collect();
        self
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] when the email or password is invalid
    /// and [`AuthError::Repository`] when the email is already registered or
    /// persistence fails.
    pub async fn register(&self, credentials: Credentials) -> AuthResult<UserAccount> {
        let Credentials { email, password } = credentials;
        let email = Email::new(email)?;
        let password_hash = PasswordHash::derive(&password)?;
        let role = if self.admin_emails.contains(&email) {
            Role::Admin
        } else {
            Role::User
        };

        let account = UserAccount::register(email, password_hash, role, &*self.clock);
        self.repository.store(&account).await?;
        info!(user_id = %account.id(), role = %account.role(), "user registered");
        Ok(account)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email is unknown or
    /// the password does not match.
    pub async fn login(&self, credentials: Credentials) -> AuthResult<IssuedToken> {
        let Credentials { email, password } = credentials;
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let account = self
            .repository
            .find_by_email(&email)
            .await?
            .filter(|candidate| candidate.password_hash().verify(&password))
            .ok_or_else(|| {
                debug!(email = %email, "login rejected");
                AuthError::InvalidCredentials
            })?;

        let issued = self.tokens.issue(&account.principal())?;
        info!(user_id = %account.id(), "user logged in");
        Ok(issued)
    }

    /// Resolves a bearer token into the principal it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Token`] when the token is expired or invalid.
    pub fn authenticate(&self, token: &str) -> AuthResult<Principal> {
        Ok(self.tokens.verify(token)?)
    }
}
