//! Domain model for accounts, roles, and request principals.
//!
//! The task domain depends on [`Principal`] and [`Role`] to make access
//! decisions; everything else here supports registration and login.

mod error;
mod password;
mod principal;
mod user;

pub use error::{AuthDomainError, ParseRoleError};
pub use password::{MIN_PASSWORD_LENGTH, PasswordHash};
pub use principal::{Principal, Role, UserId};
pub use user::{Email, PersistedUserData, UserAccount};
