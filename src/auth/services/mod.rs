//! Application services for registration, login, and token verification.

mod session;
mod tokens;

pub use session::{AuthError, AuthResult, AuthService, Credentials};
pub use tokens::{DEFAULT_TOKEN_TTL_SECS, IssuedToken, SessionTokens, TokenError};
