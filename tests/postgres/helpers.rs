//! Shared test helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::WrapErr;
use taskgate::database::{self, PgPool};
use uuid::Uuid;

/// Environment variable naming a server the tests may create databases on.
pub const TEST_DATABASE_URL_VAR: &str = "TASKGATE_TEST_DATABASE_URL";

/// Database created for one test and dropped with the guard.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    pool: PgPool,
}

impl TemporaryDatabase {
    /// Creates a uniquely named database with the schema applied.
    ///
    /// # Errors
    ///
    /// Returns an error when the server URL is unset or unreachable, or the
    /// schema cannot be applied.
    pub async fn create() -> eyre::Result<Self> {
        let admin_url = std::env::var(TEST_DATABASE_URL_VAR)
            .wrap_err_with(|| format!("{TEST_DATABASE_URL_VAR} must point at a PostgreSQL server"))?;
        let name = format!("taskgate_test_{}", Uuid::new_v4().simple());
        tokio::task::spawn_blocking(move || Self::create_blocking(admin_url, name)).await?
    }

    fn create_blocking(admin_url: String, name: String) -> eyre::Result<Self> {
        let mut admin = PgConnection::establish(&admin_url).wrap_err("connect to test server")?;
        admin
            .batch_execute(&format!("CREATE DATABASE \"{name}\""))
            .wrap_err("create temporary database")?;
        let pool = database::connect(&database_url(&admin_url, &name), 4)?;
        database::apply_schema(&pool)?;
        Ok(Self {
            admin_url,
            name,
            pool,
        })
    }

    /// Pool connected to the temporary database.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let statement = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name);
        if let Ok(mut admin) = PgConnection::establish(&self.admin_url) {
            drop(admin.batch_execute(&statement));
        }
    }
}

/// Replaces the database name in `server_url` with `name`.
fn database_url(server_url: &str, name: &str) -> String {
    let (without_query, query) = server_url
        .split_once('?')
        .map_or((server_url, None), |(head, tail)| (head, Some(tail)));
    let base = without_query
        .rsplit_once('/')
        .map_or(without_query, |(head, _)| head);
    query.map_or_else(
        || format!("{base}/{name}"),
        |params| format!("{base}/{name}?{params}"),
    )
}

#[test]
fn database_name_is_swapped_in_urls() {
    assert_eq!(
        database_url("postgres://user:pw@localhost:5432/postgres", "t1"),
        "postgres://user:pw@localhost:5432/t1"
    );
    assert_eq!(
        database_url("postgres://localhost/postgres?sslmode=disable", "t2"),
        "postgres://localhost/t2?sslmode=disable"
    );
}
