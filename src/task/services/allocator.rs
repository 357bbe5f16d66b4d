//! Daily sequential task identifier allocation.

use crate::task::{
    domain::{DailySequence, DayPrefix, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors raised while minting task identifiers.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// All 999 identifiers for the day are in use.
    #[error("daily task id capacity exhausted for {prefix}")]
    DailyCapacityExhausted {
        /// Day whose sequence ran out.
        prefix: DayPrefix,
    },

    /// The latest stored identifier for the day has no readable sequence.
    #[error("stored task id '{0}' has no valid daily sequence")]
    MalformedStoredId(TaskId),

    /// Every allocated identifier was taken by a concurrent writer.
    #[error("no free task id after {attempts} attempts")]
    Contention {
        /// Number of identifiers tried.
        attempts: u32,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for identifier allocation.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Mints `YYMMDDnnn` identifiers from the greatest identifier ever stored for
/// the day.
///
/// Deleted tasks keep their place in the sequence, so an identifier is never
/// issued twice.
///
/// Two callers may compute the same identifier. Uniqueness therefore relies
/// on [`TaskRepository::insert`] rejecting a taken identifier, after which
/// the caller allocates again.
pub struct DailyTaskIdAllocator<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    offset: FixedOffset,
}

impl<R, C> DailyTaskIdAllocator<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates an allocator that dates identifiers in UTC.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            offset: Utc.fix(),
        }
    }

    /// Dates identifiers in the given UTC offset instead.
    #[must_use]
    pub const fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the current calendar date in the configured offset.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().with_timezone(&self.offset).date_naive()
    }

    /// Returns the next identifier for today.
    ///
    /// # Errors
    ///
    /// See [`Self::next_id_on`].
    pub async fn next_id(&self) -> AllocationResult<TaskId> {
        self.next_id_on(self.today()).await
    }

    /// Returns the next identifier for `day`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::DailyCapacityExhausted`] once `nnn` would
    /// pass 999, [`AllocationError::MalformedStoredId`] when the stored
    /// maximum cannot be parsed, and [`AllocationError::Repository`] when the
    /// lookup fails.
    pub async fn next_id_on(&self, day: NaiveDate) -> AllocationResult<TaskId> {
        let prefix = DayPrefix::from_date(day);
        let sequence = match self.repository.find_latest_with_prefix(&prefix).await? {
            None => DailySequence::FIRST,
            Some(latest) => {
                let current = latest.daily_sequence().map_err(|err| {
                    warn!(task_id = %latest, error = %err, "unreadable stored task id");
                    AllocationError::MalformedStoredId(latest.clone())
                })?;
                current
                    .checked_next()
                    .ok_or_else(|| AllocationError::DailyCapacityExhausted {
                        prefix: prefix.clone(),
                    })?
            }
        };
        Ok(TaskId::compose(&prefix, sequence))
    }
}
