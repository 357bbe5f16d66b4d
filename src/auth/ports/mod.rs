//! Port contracts for account persistence.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
