//! Concurrent creation against one in-memory store.

use super::helpers::{Harness, admin, draft, harness};
use chrono::{FixedOffset, TimeDelta};
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::Arc;
use taskgate::auth::domain::Principal;
use taskgate::task::services::TaskLifecycleService;
use tokio::task::JoinSet;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_share_an_id(harness: Harness, admin: Principal) {
    let service = Arc::new(harness.service);
    let mut creates = JoinSet::new();
    for index in 0..40 {
        let task_service = Arc::clone(&service);
        let principal = admin.clone();
        creates.spawn(async move {
            task_service
                .create(draft(&format!("task {index}"), &["u-1"]), &principal)
                .await
        });
    }

    let mut ids = BTreeSet::new();
    while let Some(joined) = creates.join_next().await {
        let task = joined.expect("join").expect("create");
        assert!(ids.insert(task.id().clone()), "duplicate id {}", task.id());
    }

    let expected: BTreeSet<String> = (1..=40).map(|seq| format!("260314{seq:03}")).collect();
    let actual: BTreeSet<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();
    assert_eq!(actual, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn day_prefix_follows_configured_offset(harness: Harness, admin: Principal) {
    harness.clock.advance(TimeDelta::hours(1));
    // 10:30 UTC on 2026-03-14 is 00:30 on 2026-03-15 in UTC+14.
    let offset = FixedOffset::east_opt(14 * 3600).expect("valid offset");
    let service = TaskLifecycleService::new(
        Arc::clone(&harness.repository),
        Arc::clone(&harness.clock),
    )
    .with_id_offset(offset);

    let ahead = service
        .create(draft("ahead", &["u-1"]), &admin)
        .await
        .expect("create in UTC+14");
    let utc = harness
        .service
        .create(draft("utc", &["u-1"]), &admin)
        .await
        .expect("create in UTC");

    assert_eq!(ahead.id().as_str(), "260315001");
    assert_eq!(utc.id().as_str(), "260314001");
}
