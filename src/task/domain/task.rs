//! Task record, creation drafts, and partial updates.

use super::TaskId;
use crate::auth::domain::UserId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque task status tag.
///
/// Legal values are owned by clients; any non-blank value is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    /// Wraps a status value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the status as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, persisted task.
///
/// Tasks are only built by the validator or reconstructed from storage, so
/// every instance has a non-empty assignee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    due_date: DateTime<Utc>,
    assignee_ids: Vec<UserId>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status tag.
    pub status: TaskStatus,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted assignees, in stored order.
    pub assignee_ids: Vec<UserId>,
}

impl Task {
    pub(super) const fn from_validated(
        id: TaskId,
        title: String,
        description: String,
        status: TaskStatus,
        due_date: DateTime<Utc>,
        assignee_ids: Vec<UserId>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            due_date,
            assignee_ids,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            due_date: data.due_date,
            assignee_ids: data.assignee_ids,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status tag.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the assignees in stored order.
    #[must_use]
    pub fn assignee_ids(&self) -> &[UserId] {
        &self.assignee_ids
    }

    /// Returns `true` when `user` is one of the assignees.
    #[must_use]
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assignee_ids.contains(user)
    }
}

/// Unvalidated task fields submitted for creation.
///
/// Missing JSON fields deserialize to empty values so that the validator,
/// rather than the decoder, reports what is wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskDraft {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: Option<String>,
    pub(super) due_date: String,
    #[serde(alias = "userIds")]
    pub(super) assignee_ids: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with no assignees.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: Some(status.into()),
            due_date: due_date.into(),
            assignee_ids: Vec::new(),
        }
    }

    /// Replaces the assignee list.
    #[must_use]
    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignee_ids = assignees.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the submitted assignees.
    #[must_use]
    pub fn assignee_ids(&self) -> &[String] {
        &self.assignee_ids
    }

    /// Applies every field present in `patch`, leaving the rest untouched.
    #[must_use]
    pub fn merged_with(mut self, patch: TaskPatch) -> Self {
        let TaskPatch {
            title,
            description,
            status,
            due_date,
            assignee_ids,
        } = patch;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = Some(value);
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = assignee_ids {
            self.assignee_ids = value;
        }
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: Some(task.status.as_str().to_owned()),
            due_date: task.due_date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            assignee_ids: task
                .assignee_ids
                .iter()
                .map(|id| id.as_str().to_owned())
                .collect(),
        }
    }
}

/// Partial update of a task; absent fields keep their stored value.
///
/// An `id` in the request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status tag.
    pub status: Option<String>,
    /// Replacement due date, parsed during validation.
    pub due_date: Option<String>,
    /// Replacement assignee list.
    #[serde(alias = "userIds")]
    pub assignee_ids: Option<Vec<String>>,
}

