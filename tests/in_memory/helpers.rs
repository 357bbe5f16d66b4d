//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex};
use taskgate::auth::domain::{Principal, Role, UserId};
use taskgate::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskDraft, services::TaskLifecycleService,
};

/// Service type exercised by the in-memory tests.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, StepClock>;

/// Clock that stays put until a test moves it.
#[derive(Debug)]
pub struct StepClock {
    now: Mutex<DateTime<Utc>>,
}

impl StepClock {
    /// Creates a clock frozen at the given UTC time.
    ///
    /// # Panics
    ///
    /// Panics when the components do not form a valid instant.
    #[must_use]
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, min, 0)
            .single()
            .expect("valid clock instant");
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    ///
    /// # Panics
    ///
    /// Panics when the clock lock is poisoned.
    pub fn advance(&self, by: TimeDelta) {
        *self.now.lock().expect("clock lock") += by;
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Repository, clock, and service sharing one store.
pub struct Harness {
    pub repository: Arc<InMemoryTaskRepository>,
    pub clock: Arc<StepClock>,
    pub service: TestService,
}

/// Provides a fresh harness with the clock at 2026-03-14 09:30 UTC.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(StepClock::at(2026, 3, 14, 9, 30));
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock));
    Harness {
        repository,
        clock,
        service,
    }
}

/// Administrator principal.
#[fixture]
pub fn admin() -> Principal {
    Principal::new(UserId::new("admin-1"), Role::Admin)
}

/// Regular user principal with the given id.
#[must_use]
pub fn member(id: &str) -> Principal {
    Principal::new(UserId::new(id), Role::User)
}

/// Valid draft assigned to `assignees`.
#[must_use]
pub fn draft(title: &str, assignees: &[&str]) -> TaskDraft {
    TaskDraft::new(title, "Details", "open", "2026-04-01T12:00:00Z")
        .with_assignees(assignees.iter().copied())
}
