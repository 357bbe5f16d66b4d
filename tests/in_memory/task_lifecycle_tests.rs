//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Harness, admin, draft, harness, member};
use chrono::TimeDelta;
use eyre::{WrapErr, ensure};
use rstest::rstest;
use taskgate::auth::domain::Principal;
use taskgate::task::{
    domain::{TaskId, TaskPatch},
    ports::TaskRepository,
    services::TaskServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_restart_each_day(harness: Harness, admin: Principal) -> eyre::Result<()> {
    let first = harness
        .service
        .create(draft("first", &["u-1"]), &admin)
        .await
        .wrap_err("create first task")?;
    let second = harness
        .service
        .create(draft("second", &["u-1"]), &admin)
        .await
        .wrap_err("create second task")?;
    harness.clock.advance(TimeDelta::days(1));
    let next_day = harness
        .service
        .create(draft("next day", &["u-1"]), &admin)
        .await
        .wrap_err("create next-day task")?;

    ensure!(first.id().as_str() == "260314001", "got {}", first.id());
    ensure!(second.id().as_str() == "260314002", "got {}", second.id());
    ensure!(next_day.id().as_str() == "260315001", "got {}", next_day.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_only_see_their_own_tasks(harness: Harness, admin: Principal) -> eyre::Result<()> {
    let alice = member("alice");
    let bob = member("bob");
    let mine = harness
        .service
        .create(draft("alice's", &["someone-else"]), &alice)
        .await?;
    harness
        .service
        .create(draft("bob's", &["bob"]), &admin)
        .await?;

    ensure!(
        mine.assignee_ids().iter().map(|id| id.as_str()).eq(["alice"]),
        "non-admin creates must be self-assigned"
    );

    let visible = harness.service.fetch_all(&alice).await?;
    ensure!(visible.len() == 1, "alice saw {} tasks", visible.len());
    ensure!(harness.service.fetch_all(&admin).await?.len() == 2);

    let denied = harness.service.fetch_by_id(mine.id(), &bob).await;
    ensure!(
        matches!(denied, Err(TaskServiceError::AccessDenied)),
        "bob must not read alice's task: {denied:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_reports_not_found(harness: Harness, admin: Principal) {
    let result = harness.service.fetch_all(&admin).await;
    assert!(matches!(result, Err(TaskServiceError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_then_delete_round_trip(harness: Harness, admin: Principal) -> eyre::Result<()> {
    let assignee = member("carol");
    let created = harness
        .service
        .create(draft("draft plan", &["carol"]), &admin)
        .await?;

    let patch = TaskPatch {
        status: Some("done".to_owned()),
        ..TaskPatch::default()
    };
    let updated = harness
        .service
        .update(created.id(), patch, &assignee)
        .await
        .wrap_err("assignee updates status")?;
    ensure!(updated.status().as_str() == "done");
    ensure!(updated.title() == "draft plan");

    let stored = harness
        .repository
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished after update"))?;
    ensure!(stored == updated, "stored task differs from returned task");

    harness.service.delete(created.id(), &admin).await?;
    let gone = harness.service.fetch_by_id(created.id(), &admin).await;
    ensure!(matches!(gone, Err(TaskServiceError::NotFound)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_update_leaves_task_untouched(
    harness: Harness,
    admin: Principal,
) -> eyre::Result<()> {
    let created = harness
        .service
        .create(draft("keep me", &["dave"]), &admin)
        .await?;
    let patch = TaskPatch {
        assignee_ids: Some(Vec::new()),
        ..TaskPatch::default()
    };

    let result = harness.service.update(created.id(), patch, &admin).await;
    ensure!(matches!(result, Err(TaskServiceError::InvalidTask(_))));

    let stored = harness.service.fetch_by_id(created.id(), &admin).await?;
    ensure!(stored == created, "rejected update must not be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_ids_are_not_found(harness: Harness, admin: Principal) {
    let id = TaskId::new("260314999");
    let fetched = harness.service.fetch_by_id(&id, &admin).await;
    let deleted = harness.service.delete(&id, &admin).await;
    assert!(matches!(fetched, Err(TaskServiceError::NotFound)));
    assert!(matches!(deleted, Err(TaskServiceError::NotFound)));
}
