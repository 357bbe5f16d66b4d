//! Salted password digests.

use super::AuthDomainError;
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Minimum number of characters accepted for a password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const SALT_SEPARATOR: char = '$';

/// Salted SHA-256 digest of a password, stored as `salt$digest` in hex.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Derives a digest for a new password using a random salt.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::WeakPassword`] when the password is shorter
    /// than [`MIN_PASSWORD_LENGTH`] characters.
    pub fn derive(password: &str) -> Result<Self, AuthDomainError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthDomainError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }
        let salt = Uuid::new_v4().simple().to_string();
        Ok(Self(format!(
            "{salt}{SALT_SEPARATOR}{}",
            digest_hex(&salt, password)
        )))
    }

    /// Reconstructs a digest previously produced by [`Self::derive`].
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` when `password` matches this digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt, expected)) = self.0.split_once(SALT_SEPARATOR) else {
            return false;
        };
        let actual = digest_hex(salt, password);
        bool::from(actual.as_bytes().ct_eq(expected.as_bytes()))
    }

    /// Returns the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
