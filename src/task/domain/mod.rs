//! Domain model for task records.
//!
//! Covers the `YYMMDDnnn` identifier scheme, the task record and its draft
//! and patch inputs, structural validation, and the ownership access rule.
//! Infrastructure concerns stay outside of the domain boundary.

mod error;
mod ids;
mod policy;
mod task;
mod validation;

pub use error::TaskDomainError;
pub use ids::{DailySequence, DayPrefix, TaskId};
pub use policy::has_access;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch, TaskStatus};
pub use validation::{TaskValidationError, is_valid_task, parse_due_date, validate_task};
