//! Structural checks a draft must pass before it becomes a [`Task`].

use super::{Task, TaskDraft, TaskId, TaskStatus};
use crate::auth::domain::UserId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use thiserror::Error;

/// Fractional-second digits kept on due dates, matching `TIMESTAMPTZ`.
const DUE_DATE_SUBSEC_DIGITS: u16 = 6;

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The first rule a task draft violates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The assigned identifier is blank.
    #[error("task id must not be blank")]
    BlankId,

    /// The title is blank.
    #[error("title must not be blank")]
    BlankTitle,

    /// The description is blank.
    #[error("description must not be blank")]
    BlankDescription,

    /// No status was supplied.
    #[error("status is required")]
    MissingStatus,

    /// The due date is not a recognisable date or timestamp.
    #[error("due date '{0}' is not a valid date")]
    InvalidDueDate(String),

    /// The assignee list is empty.
    #[error("at least one assignee is required")]
    NoAssignees,

    /// An assignee entry is blank.
    #[error("assignee ids must not be blank")]
    BlankAssignee,
}

/// Parses a due date.
///
/// Accepts RFC 3339 timestamps, offset-less timestamps (read as UTC), and
/// bare `YYYY-MM-DD` dates (midnight UTC). Sub-microsecond digits are
/// dropped so a stored task reads back unchanged from every adapter.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    parse_instant(raw.trim()).map(|instant| instant.trunc_subsecs(DUE_DATE_SUBSEC_DIGITS))
}

fn parse_instant(trimmed: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Checks `draft` under the identifier `id` and builds the task.
///
/// # Errors
///
/// Returns the first violated [`TaskValidationError`] rule.
pub fn validate_task(id: &TaskId, draft: &TaskDraft) -> Result<Task, TaskValidationError> {
    if is_blank(id.as_str()) {
        return Err(TaskValidationError::BlankId);
    }
    if is_blank(&draft.title) {
        return Err(TaskValidationError::BlankTitle);
    }
    if is_blank(&draft.description) {
        return Err(TaskValidationError::BlankDescription);
    }
    let status = draft
        .status
        .as_deref()
        .filter(|value| !is_blank(value))
        .ok_or(TaskValidationError::MissingStatus)?;
    let due_date = parse_due_date(&draft.due_date)
        .ok_or_else(|| TaskValidationError::InvalidDueDate(draft.due_date.clone()))?;
    if draft.assignee_ids.is_empty() {
        return Err(TaskValidationError::NoAssignees);
    }
    if draft.assignee_ids.iter().any(|assignee| is_blank(assignee)) {
        return Err(TaskValidationError::BlankAssignee);
    }

    Ok(Task::from_validated(
        id.clone(),
        draft.title.clone(),
        draft.description.clone(),
        TaskStatus::new(status),
        due_date,
        draft.assignee_ids.iter().map(UserId::new).collect(),
    ))
}

/// Returns `true` when `draft` would pass [`validate_task`].
#[must_use]
pub fn is_valid_task(id: &TaskId, draft: &TaskDraft) -> bool {
    validate_task(id, draft).is_ok()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
