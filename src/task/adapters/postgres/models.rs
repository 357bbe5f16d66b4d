//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Date-prefixed task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Opaque status tag.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Assigned user identifiers.
    pub assignee_ids: Vec<String>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Date-prefixed task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Opaque status tag.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Assigned user identifiers.
    pub assignee_ids: Vec<String>,
}

/// Changeset replacing every mutable task column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Opaque status tag.
    pub status: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Assigned user identifiers.
    pub assignee_ids: Vec<String>,
}
