//! HS256 session tokens carrying the principal's identity and role.

use crate::auth::domain::{Principal, Role, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Default lifetime of an issued session token, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Errors raised while issuing or verifying session tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token was well formed and signed but has expired.
    #[error("Token expired.")]
    Expired,

    /// The token is malformed, tampered with, or signed with another key.
    #[error("Invalid token.")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Signing a new token failed.
    #[error("failed to sign session token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Returns the encoded token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Issues and verifies session tokens with a shared secret.
///
/// Expiry is checked against the injected clock rather than the system
/// time so that tests can move time deterministically.
pub struct SessionTokens<C>
where
    C: Clock + Send + Sync,
{
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
    clock: Arc<C>,
}

impl<C> fmt::Debug for SessionTokens<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<C> SessionTokens<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a token service signing with `secret`.
    #[must_use]
    pub fn new(secret: &[u8], ttl: TimeDelta, clock: Arc<C>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    /// Signs a token for `principal`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when encoding fails.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at + self.ttl;
        let claims = SessionClaims {
            sub: principal.id().as_str().to_owned(),
            role: principal.role(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies `token` and returns the principal it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] when the expiry has passed and
    /// [`TokenError::Invalid`] for any other verification failure.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding, &validation).map_err(|err| {
            match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(err),
            }
        })?;

        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(Principal::new(
            UserId::new(data.claims.sub),
            data.claims.role,
        ))
    }
}
