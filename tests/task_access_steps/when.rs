//! When steps for task access control scenarios.

use super::world::{TaskAccessWorld, parse_day, run_async, user};
use rstest_bdd_macros::when;
use taskgate::task::domain::{TaskDraft, TaskPatch};

#[when(r#"the administrator creates {count:u32} tasks for "{assignee}" on "{day}""#)]
fn admin_creates_tasks(
    world: &mut TaskAccessWorld,
    count: u32,
    assignee: String,
    day: String,
) -> Result<(), eyre::Report> {
    world.clock.set_day(parse_day(&day)?)?;
    for index in 0..count {
        let draft = TaskDraft::new(
            format!("Task {index}"),
            "Scenario task",
            "open",
            "2026-04-01",
        )
        .with_assignees([assignee.as_str()]);
        match run_async(world.service.create(draft, &world.admin)) {
            Ok(task) => world.created_ids.push(task.id().clone()),
            Err(err) => {
                world.last_create_error = Some(err);
                break;
            }
        }
    }
    Ok(())
}

#[when(r#"user "{id}" requests that task"#)]
fn user_requests_task(world: &mut TaskAccessWorld, id: String) -> Result<(), eyre::Report> {
    let target = world
        .target
        .clone()
        .ok_or_else(|| eyre::eyre!("missing target task in scenario world"))?;
    world.last_result = Some(run_async(world.service.fetch_by_id(&target, &user(&id))));
    Ok(())
}

#[when(r#"user "{id}" sets the task status to "{status}""#)]
fn user_sets_status(
    world: &mut TaskAccessWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let target = world
        .target
        .clone()
        .ok_or_else(|| eyre::eyre!("missing target task in scenario world"))?;
    let patch = TaskPatch {
        status: Some(status),
        ..TaskPatch::default()
    };
    world.last_result = Some(run_async(world.service.update(&target, patch, &user(&id))));
    Ok(())
}
