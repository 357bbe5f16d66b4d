//! Shared `PostgreSQL` connection pool and schema bootstrap.
//!
//! Both the task and account adapters draw connections from the same
//! [`PgPool`]. The schema statements are idempotent so they can run on every
//! start-up and before each integration test.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the `tasks` table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_tasks/up.sql");

/// SQL creating the per-day identifier high-water table.
pub const CREATE_TASK_ID_HIGH_WATER_SQL: &str =
    include_str!("../migrations/2026-10-18-000000_create_task_id_high_water/up.sql");

/// SQL creating the `users` table.
pub const CREATE_USERS_SQL: &str =
    include_str!("../migrations/2026-10-01-000001_create_users/up.sql");

/// Errors raised while connecting to or preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A schema statement failed.
    #[error("schema migration failed: {0}")]
    Migration(#[from] diesel::result::Error),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`DatabaseError::Pool`] when the initial connections cannot be
/// established.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies the task and account schema.
///
/// This is a blocking operation that should be called from `spawn_blocking`
/// or a synchronous context.
///
/// # Errors
///
/// Returns [`DatabaseError`] when a connection is unavailable or a statement
/// fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut connection = pool.get()?;
    connection.batch_execute(CREATE_TASKS_SQL)?;
    connection.batch_execute(CREATE_TASK_ID_HIGH_WATER_SQL)?;
    connection.batch_execute(CREATE_USERS_SQL)?;
    Ok(())
}
