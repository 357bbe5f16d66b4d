//! Then steps for task access control scenarios.

use super::world::{TaskAccessWorld, run_async};
use rstest_bdd_macros::then;
use taskgate::task::{
    ports::TaskRepository,
    services::{AllocationError, TaskServiceError},
};

#[then(r#"the created task ids are "{expected}""#)]
fn created_ids_are(world: &TaskAccessWorld, expected: String) -> Result<(), eyre::Report> {
    let actual: Vec<&str> = world.created_ids.iter().map(|id| id.as_str()).collect();
    let wanted: Vec<&str> = expected.split(',').map(str::trim).collect();
    if actual != wanted {
        return Err(eyre::eyre!("expected ids {wanted:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("access is denied")]
fn access_is_denied(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result in scenario world"))?;
    if !matches!(result, Err(TaskServiceError::AccessDenied)) {
        return Err(eyre::eyre!("expected access denied, found {result:?}"));
    }
    Ok(())
}

#[then(r#"the stored task has status "{status}""#)]
fn stored_task_has_status(world: &TaskAccessWorld, status: String) -> Result<(), eyre::Report> {
    let target = world
        .target
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing target task in scenario world"))?;
    let stored = run_async(world.repository.find_by_id(target))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("task {target} is missing"))?;
    if stored.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("creation fails because the day is exhausted")]
fn creation_fails_exhausted(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_create_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected task creation to fail"))?;
    if !matches!(
        error,
        TaskServiceError::Allocation(AllocationError::DailyCapacityExhausted { .. })
    ) {
        return Err(eyre::eyre!("expected daily capacity exhaustion, found {error}"));
    }
    Ok(())
}
