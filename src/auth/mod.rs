//! Account registration, login, and session tokens.
//!
//! Accounts are stored behind the [`ports::UserRepository`] port. A
//! successful login yields an HS256 session token whose claims carry the
//! user identifier and [`domain::Role`]; the HTTP layer turns a verified token
//! back into the [`domain::Principal`] that task authorization acts on.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
