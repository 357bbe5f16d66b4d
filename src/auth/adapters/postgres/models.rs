//! Diesel row models for account persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for account records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: String,
    /// Normalized login email.
    pub email: String,
    /// Salted password digest.
    pub password_hash: String,
    /// Account role.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Account identifier.
    pub id: String,
    /// Normalized login email.
    pub email: String,
    /// Salted password digest.
    pub password_hash: String,
    /// Account role.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
