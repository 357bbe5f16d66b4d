//! Given steps for task access control scenarios.

use super::world::{TaskAccessWorld, run_async};
use chrono::{TimeZone, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskgate::auth::domain::UserId;
use taskgate::task::{
    domain::{PersistedTaskData, Task, TaskDraft, TaskId, TaskStatus},
    ports::TaskRepository,
};

#[given("an administrator")]
fn an_administrator(world: &mut TaskAccessWorld) {
    world.created_ids.clear();
}

#[given(r#"a task assigned to "{assignee}""#)]
fn task_assigned_to(world: &mut TaskAccessWorld, assignee: String) -> Result<(), eyre::Report> {
    let draft = TaskDraft::new("Quarterly report", "Collect figures", "open", "2026-04-01")
        .with_assignees([assignee]);
    let task = run_async(world.service.create(draft, &world.admin))
        .wrap_err("create task for scenario")?;
    world.target = Some(task.id().clone());
    Ok(())
}

#[given(r#"task "{id}" already exists"#)]
fn task_already_exists(world: &mut TaskAccessWorld, id: String) -> Result<(), eyre::Report> {
    let due_date = Utc
        .with_ymd_and_hms(2026, 4, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid due date"))?;
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title: "Seeded".to_owned(),
        description: "Seeded task".to_owned(),
        status: TaskStatus::new("open"),
        due_date,
        assignee_ids: vec![UserId::new("worker-1")],
    });
    run_async(world.repository.insert(&task)).wrap_err("seed existing task")?;
    Ok(())
}
