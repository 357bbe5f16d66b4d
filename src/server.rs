//! Server assembly and lifecycle.

use crate::auth::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    domain::{AuthDomainError, Email},
    ports::UserRepository,
    services::{AuthService, SessionTokens},
};
use crate::config::ServerConfig;
use crate::database::{self, DatabaseError, PgPool};
use crate::http::{self, AppState};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskLifecycleService,
};
use axum::Router;
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// An `ADMIN_EMAILS` entry is not a valid email address.
    #[error("invalid admin email in configuration: {0}")]
    AdminEmail(#[from] AuthDomainError),

    /// The database could not be reached or prepared.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The blocking database bootstrap task panicked or was cancelled.
    #[error("database bootstrap task failed: {0}")]
    Bootstrap(#[from] tokio::task::JoinError),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address from the configuration.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the application router over the given repositories.
///
/// # Errors
///
/// Returns [`ServerError::AdminEmail`] when a configured admin email is
/// malformed.
pub fn app<T, U, C>(
    config: &ServerConfig,
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
) -> Result<Router, ServerError>
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let admin_emails = config
        .admin_email_entries()
        .map(Email::new)
        .collect::<Result<Vec<_>, _>>()?;

    let tokens = SessionTokens::new(
        config.jwt_secret.as_bytes(),
        TimeDelta::seconds(config.token_ttl_secs),
        Arc::clone(&clock),
    );
    let auth = AuthService::new(users, tokens, Arc::clone(&clock)).with_admin_emails(admin_emails);
    let lifecycle = TaskLifecycleService::new(tasks, clock)
        .with_id_offset(config.task_id_utc_offset)
        .with_max_create_attempts(config.task_create_attempts);

    Ok(http::router(AppState::new(lifecycle, auth)))
}

/// Runs the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`ServerError`] when start-up fails or the listener stops with an
/// I/O error.
pub async fn run(config: &ServerConfig) -> Result<(), ServerError> {
    let clock = Arc::new(DefaultClock);
    let router = if let Some(url) = config.database_url.as_deref() {
        let pool = open_database(url.to_owned(), config.database_pool_size).await?;
        info!(pool_size = config.database_pool_size, "using PostgreSQL storage");
        app(
            config,
            Arc::new(PostgresTaskRepository::new(pool.clone())),
            Arc::new(PostgresUserRepository::new(pool)),
            clock,
        )?
    } else {
        warn!("DATABASE_URL is not set; tasks and accounts are kept in memory");
        app(
            config,
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            clock,
        )?
    };

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    info!(addr = %config.bind, "taskgate listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    info!("taskgate stopped");
    Ok(())
}

async fn open_database(url: String, pool_size: u32) -> Result<PgPool, ServerError> {
    let pool = tokio::task::spawn_blocking(move || {
        let pool = database::connect(&url, pool_size)?;
        database::apply_schema(&pool)?;
        Ok::<_, DatabaseError>(pool)
    })
    .await??;
    Ok(pool)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
