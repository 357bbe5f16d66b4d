//! Shared state handed to every request handler.

use crate::auth::{ports::UserRepository, services::AuthService};
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use mockable::Clock;
use std::sync::Arc;

/// Services reachable from handlers.
pub struct AppState<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Task lifecycle service.
    pub tasks: Arc<TaskLifecycleService<T, C>>,
    /// Registration, login, and token verification.
    pub auth: Arc<AuthService<U, C>>,
}

impl<T, U, C> AppState<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Wraps the services for sharing across requests.
    #[must_use]
    pub fn new(tasks: TaskLifecycleService<T, C>, auth: AuthService<U, C>) -> Self {
        Self {
            tasks: Arc::new(tasks),
            auth: Arc::new(auth),
        }
    }
}

impl<T, U, C> Clone for AppState<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            auth: Arc::clone(&self.auth),
        }
    }
}
