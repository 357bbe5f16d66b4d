//! `PostgreSQL` repository implementation for account storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::auth::{
    domain::{Email, PasswordHash, PersistedUserData, Role, UserAccount, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use crate::database::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed account repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, account: &UserAccount) -> UserRepositoryResult<()> {
        let user_id = account.id().clone();
        let email = account.email().clone();
        let new_row = NewUserRow {
            id: account.id().as_str().to_owned(),
            email: account.email().as_str().to_owned(),
            password_hash: account.password_hash().as_str().to_owned(),
            role: account.role().as_str().to_owned(),
            created_at: account.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<UserAccount>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<UserAccount>> {
        let lookup = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .find(lookup)
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }
}

fn row_to_account(row: UserRow) -> UserRepositoryResult<UserAccount> {
    let UserRow {
        id,
        email: persisted_email,
        password_hash,
        role: persisted_role,
        created_at,
    } = row;

    let email = Email::new(persisted_email).map_err(UserRepositoryError::persistence)?;
    let role = Role::try_from(persisted_role.as_str()).map_err(UserRepositoryError::persistence)?;

    Ok(UserAccount::from_persisted(PersistedUserData {
        id: UserId::new(id),
        email,
        password_hash: PasswordHash::from_stored(password_hash),
        role,
        created_at,
    }))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_email_unique")
}
