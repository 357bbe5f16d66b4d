//! Error types for task identifier parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The identifier does not end in a three-digit daily sequence.
    #[error("malformed task id '{0}', expected YYMMDDnnn")]
    MalformedTaskId(String),

    /// The sequence number is outside `1..=999`.
    #[error("daily sequence {0} is outside 1..=999")]
    SequenceOutOfRange(u16),
}
