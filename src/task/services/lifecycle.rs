//! Service layer coordinating task allocation, validation, access, and
//! persistence.

use super::allocator::{AllocationError, DailyTaskIdAllocator};
use crate::auth::domain::Principal;
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError, has_access, validate_task},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::FixedOffset;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default number of identifiers tried before a create gives up.
pub const DEFAULT_MAX_CREATE_ATTEMPTS: u32 = 64;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The task does not exist, or no task has ever been stored.
    #[error("Task not found")]
    NotFound,

    /// The principal may not access the task.
    #[error("You do not have permission to access this task.")]
    AccessDenied,

    /// The task fields failed validation.
    #[error("The task is invalid: {0}")]
    InvalidTask(#[from] TaskValidationError),

    /// Identifier allocation failed.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns `true` for caller-correctable errors.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::NotFound | Self::AccessDenied | Self::InvalidTask(_))
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
///
/// Holds no per-request state; every operation reads through to the
/// repository.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    allocator: DailyTaskIdAllocator<R, C>,
    max_create_attempts: u32,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service dating identifiers in UTC.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        let allocator = DailyTaskIdAllocator::new(Arc::clone(&repository), clock);
        Self {
            repository,
            allocator,
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
        }
    }

    /// Dates new identifiers in the given UTC offset.
    #[must_use]
    pub fn with_id_offset(mut self, offset: FixedOffset) -> Self {
        self.allocator = self.allocator.with_offset(offset);
        self
    }

    /// Sets how many identifiers a create tries before giving up. Values
    /// below one are treated as one.
    #[must_use]
    pub fn with_max_create_attempts(mut self, attempts: u32) -> Self {
        self.max_create_attempts = attempts.max(1);
        self
    }

    /// Creates a task.
    ///
    /// Non-admins may only create tasks for themselves: the assignee list is
    /// replaced with the principal. An identifier taken by a concurrent
    /// create is replaced with a freshly allocated one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidTask`] when validation fails,
    /// [`TaskServiceError::Allocation`] when no identifier can be minted, and
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, draft: TaskDraft, principal: &Principal) -> TaskServiceResult<Task> {
        let scoped = if principal.is_admin() {
            draft
        } else {
            draft.with_assignees([principal.id().as_str()])
        };

        for attempt in 1..=self.max_create_attempts {
            let id = self.allocator.next_id().await?;
            let task = validate_task(&id, &scoped)?;
            match self.repository.insert(&task).await {
                Ok(()) => {
                    info!(task_id = %task.id(), principal = %principal.id(), attempt, "task created");
                    return Ok(task);
                }
                Err(TaskRepositoryError::DuplicateTask(taken)) => {
                    debug!(task_id = %taken, attempt, "task id taken concurrently, reallocating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        warn!(
            attempts = self.max_create_attempts,
            "task id allocation kept colliding"
        );
        Err(AllocationError::Contention {
            attempts: self.max_create_attempts,
        }
        .into())
    }

    /// Lists the tasks visible to `principal`: every task for admins, the
    /// assigned tasks for anyone else.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has ever been
    /// stored. A populated store with no matching task yields an empty list.
    pub async fn fetch_all(&self, principal: &Principal) -> TaskServiceResult<Vec<Task>> {
        if !self.repository.has_any().await? {
            return Err(TaskServiceError::NotFound);
        }
        let tasks = if principal.is_admin() {
            self.repository.list_all().await?
        } else {
            self.repository.find_by_assignee(principal.id()).await?
        };
        Ok(tasks)
    }

    /// Retrieves one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::AccessDenied`] when `principal` may not see it.
    pub async fn fetch_by_id(&self, id: &TaskId, principal: &Principal) -> TaskServiceResult<Task> {
        self.load_accessible(id, principal).await
    }

    /// Merges `patch` into a task and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::AccessDenied`] when `principal` may not change it,
    /// and [`TaskServiceError::InvalidTask`] when the merged task fails
    /// validation.
    pub async fn update(
        &self,
        id: &TaskId,
        patch: TaskPatch,
        principal: &Principal,
    ) -> TaskServiceResult<Task> {
        let current = self.load_accessible(id, principal).await?;
        let merged = TaskDraft::from(&current).merged_with(patch);
        let updated = validate_task(current.id(), &merged)?;
        self.repository
            .update(&updated)
            .await
            .map_err(not_found_as_domain)?;
        info!(task_id = %updated.id(), principal = %principal.id(), "task updated");
        Ok(updated)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::AccessDenied`] when `principal` may not
    /// delete it.
    pub async fn delete(&self, id: &TaskId, principal: &Principal) -> TaskServiceResult<()> {
        let current = self.load_accessible(id, principal).await?;
        self.repository
            .delete(current.id())
            .await
            .map_err(not_found_as_domain)?;
        info!(task_id = %current.id(), principal = %principal.id(), "task deleted");
        Ok(())
    }

    async fn load_accessible(&self, id: &TaskId, principal: &Principal) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound)?;
        if !has_access(&task, Some(principal)) {
            debug!(task_id = %id, principal = %principal.id(), "task access denied");
            return Err(TaskServiceError::AccessDenied);
        }
        Ok(task)
    }
}

fn not_found_as_domain(err: TaskRepositoryError) -> TaskServiceError {
    match err {
        TaskRepositoryError::NotFound(_) => TaskServiceError::NotFound,
        other => other.into(),
    }
}
