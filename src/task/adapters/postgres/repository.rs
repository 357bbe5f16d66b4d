//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{task_id_high_water, tasks},
};
use crate::auth::domain::UserId;
use crate::database::PgPool;
use crate::task::{
    domain::{DayPrefix, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
///
/// Inserts rely on the primary key to reject identifiers that a concurrent
/// allocator has already used. Each insert also raises the day's row in
/// `task_id_high_water` in the same transaction, so deletes never make an
/// identifier available again.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id().clone();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(tasks::table).values(&new_row).execute(tx)?;
                    raise_high_water(tx, &task_id)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id.clone())
                    }
                    _ => TaskRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id().clone();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.as_str()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let task_id = id.clone();
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(task_id.as_str()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let lookup = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(lookup)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn find_latest_with_prefix(
        &self,
        prefix: &DayPrefix,
    ) -> TaskRepositoryResult<Option<TaskId>> {
        let day = prefix.as_str().to_owned();
        self.run_blocking(move |connection| {
            let latest = task_id_high_water::table
                .find(day)
                .select(task_id_high_water::last_id)
                .first::<String>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(latest.map(TaskId::new))
        })
        .await
    }

    async fn find_by_assignee(&self, assignee: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let member = vec![assignee.as_str().to_owned()];
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee_ids.contains(member))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn has_any(&self) -> TaskRepositoryResult<bool> {
        self.run_blocking(|connection| {
            diesel::select(exists(tasks::table.select(tasks::id)))
                .get_result::<bool>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn raise_high_water(connection: &mut PgConnection, id: &TaskId) -> QueryResult<usize> {
    let day = id.as_str().get(..DayPrefix::LEN).unwrap_or_default();
    diesel::sql_query(concat!(
        "INSERT INTO task_id_high_water (day_prefix, last_id) VALUES ($1, $2) ",
        "ON CONFLICT (day_prefix) DO UPDATE ",
        "SET last_id = GREATEST(task_id_high_water.last_id, EXCLUDED.last_id)",
    ))
    .bind::<diesel::sql_types::Text, _>(day)
    .bind::<diesel::sql_types::Text, _>(id.as_str())
    .execute(connection)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().as_str().to_owned(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        assignee_ids: assignee_strings(task),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        due_date: task.due_date(),
        assignee_ids: assignee_strings(task),
    }
}

fn assignee_strings(task: &Task) -> Vec<String> {
    task.assignee_ids()
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect()
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        description,
        status,
        due_date,
        assignee_ids,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        status: TaskStatus::new(status),
        due_date,
        assignee_ids: assignee_ids.into_iter().map(UserId::new).collect(),
    })
}
