//! Repository port for task persistence and lookup.

use crate::auth::domain::UserId;
use crate::task::domain::{DayPrefix, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must make [`TaskRepository::insert`] a create-if-absent
/// operation keyed on the task identifier: concurrent allocators may mint the
/// same identifier and rely on the conflict being reported.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task unless its identifier is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces the stored fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the greatest identifier ever inserted with `prefix`, or `None`
    /// when no task was minted on that day.
    ///
    /// Deleting a task must not lower the result, otherwise its identifier
    /// would be handed out again.
    async fn find_latest_with_prefix(
        &self,
        prefix: &DayPrefix,
    ) -> TaskRepositoryResult<Option<TaskId>>;

    /// Returns every task listing `assignee`, ordered by identifier.
    async fn find_by_assignee(&self, assignee: &UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task, ordered by identifier.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns `true` once at least one task has been stored.
    async fn has_any(&self) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
