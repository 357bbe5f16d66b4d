//! Shared world state for task access control BDD scenarios.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;
use rstest::fixture;
use taskgate::auth::domain::{Principal, Role, UserId};
use taskgate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{TaskLifecycleService, TaskServiceError},
};

/// Clock the scenario moves between calendar days.
#[derive(Debug)]
pub struct ScenarioClock {
    now: Mutex<DateTime<Utc>>,
}

impl ScenarioClock {
    fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    /// Moves the clock to noon UTC on `day`.
    ///
    /// # Errors
    ///
    /// Returns an error when the lock is poisoned or noon does not exist.
    pub fn set_day(&self, day: NaiveDate) -> eyre::Result<()> {
        let noon = day
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| eyre::eyre!("noon is not a valid time on {day}"))?
            .and_utc();
        *self
            .now
            .lock()
            .map_err(|_| eyre::eyre!("scenario clock lock poisoned"))? = noon;
        Ok(())
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.lock().map_or_else(|poisoned| *poisoned.into_inner(), |now| *now)
    }
}

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, ScenarioClock>;

/// Scenario world for task access behaviour tests.
pub struct TaskAccessWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub clock: Arc<ScenarioClock>,
    pub service: TestTaskService,
    pub admin: Principal,
    pub created_ids: Vec<TaskId>,
    pub target: Option<TaskId>,
    pub last_create_error: Option<TaskServiceError>,
    pub last_result: Option<Result<Task, TaskServiceError>>,
}

impl TaskAccessWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(ScenarioClock::new());
        let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock));
        Self {
            repository,
            clock,
            service,
            admin: Principal::new(UserId::new("admin"), Role::Admin),
            created_ids: Vec::new(),
            target: None,
            last_create_error: None,
            last_result: None,
        }
    }
}

impl Default for TaskAccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular user principal.
#[must_use]
pub fn user(id: &str) -> Principal {
    Principal::new(UserId::new(id), Role::User)
}

/// Parses a `YYYY-MM-DD` step argument.
///
/// # Errors
///
/// Returns an error when the text is not a calendar date.
pub fn parse_day(text: &str) -> eyre::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid scenario date {text}: {err}"))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAccessWorld {
    TaskAccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
