// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use modscan_core::{ErrorKind, FakeClock, JobStatus, TaskOutcome};
use std::time::Duration;

fn job(id: &str, created_at_ms: u64) -> Job {
    Job::builder().id(id).created_at_ms(created_at_ms).modified_at_ms(created_at_ms).build()
}

fn memory_store(clock: &FakeClock) -> MemoryJobStore {
    MemoryJobStore::in_memory().with_clock(Arc::new(clock.clone()))
}

async fn file_store(dir: &tempfile::TempDir, clock: &FakeClock) -> FileJobStore {
    FileJobStore::open(dir.path().join("jobs")).await.unwrap().with_clock(Arc::new(clock.clone()))
}

fn bump_enqueued(n: u64) -> JobMutator<'static> {
    Box::new(move |job: &mut Job| {
        job.num_enqueued += n;
        Ok(())
    })
}

/// Behaviour every store must share, run against each backend.
async fn exercise_crud(store: &dyn JobStore, clock: &FakeClock) {
    let cancel = CancellationToken::new();

    store.create_job(job("job-a", 10), &cancel).await.unwrap();
    let err = store.create_job(job("job-a", 11), &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(store.get_job("job-a", &cancel).await.unwrap().created_at_ms, 10);
    let err = store.get_job("job-missing", &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    clock.set_epoch_ms(2_000_000);
    let updated = store.update_job("job-a", bump_enqueued(3), &cancel).await.unwrap();
    assert_eq!(updated.num_enqueued, 3);
    assert_eq!(updated.modified_at_ms, 2_000_000);
    assert_eq!(store.get_job("job-a", &cancel).await.unwrap(), updated);

    store.create_job(job("job-b", 5), &cancel).await.unwrap();
    let ids: Vec<_> =
        store.list_jobs(&cancel).await.unwrap().into_iter().map(|j| j.id.to_string()).collect();
    assert_eq!(ids, ["job-b", "job-a"]);

    store.delete_job("job-a", &cancel).await.unwrap();
    let err = store.delete_job("job-a", &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = store.update_job("job-a", bump_enqueued(1), &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn memory_store_crud() {
    let clock = FakeClock::new();
    exercise_crud(&memory_store(&clock), &clock).await;
}

#[tokio::test]
async fn file_store_crud() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    exercise_crud(&file_store(&dir, &clock).await, &clock).await;
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    let cancel = CancellationToken::new();
    {
        let store = file_store(&dir, &clock).await;
        store.create_job(job("job-a", 10), &cancel).await.unwrap();
        store
            .update_job(
                "job-a",
                Box::new(|j: &mut Job| {
                    j.record_outcome(TaskOutcome::Failed("boom".into()));
                    Ok(())
                }),
                &cancel,
            )
            .await
            .unwrap();
    }

    let reopened = file_store(&dir, &clock).await;
    let loaded = reopened.get_job("job-a", &cancel).await.unwrap();
    assert_eq!(loaded.num_failed, 1);
    assert_eq!(loaded.error.as_deref(), Some("boom"));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("jobs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(leftovers, ["job-a.json"]);
}

#[tokio::test]
async fn file_store_rejects_path_like_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir, &FakeClock::new()).await;
    let cancel = CancellationToken::new();

    let err = store.create_job(job("../escape", 1), &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = store.get_job("../escape", &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn file_store_reports_corrupt_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir, &FakeClock::new()).await;
    std::fs::write(dir.path().join("jobs/job-x.json"), b"{ not json").unwrap();

    let err = store.get_job("job-x", &CancellationToken::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageAccess);
}

#[tokio::test]
async fn failed_mutator_persists_nothing() {
    let clock = FakeClock::new();
    let store = memory_store(&clock);
    let cancel = CancellationToken::new();
    store.create_job(job("job-a", 10), &cancel).await.unwrap();
    clock.advance(Duration::from_secs(5));

    let err = store
        .update_job(
            "job-a",
            Box::new(|j: &mut Job| {
                j.num_enqueued = 99;
                j.status = JobStatus::Failed;
                Err(Error::invalid_argument("nope"))
            }),
            &cancel,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(store.get_job("job-a", &cancel).await.unwrap(), job("job-a", 10));
}

#[tokio::test]
async fn mutator_cannot_change_the_id() {
    let store = memory_store(&FakeClock::new());
    let cancel = CancellationToken::new();
    store.create_job(job("job-a", 10), &cancel).await.unwrap();

    let err = store
        .update_job(
            "job-a",
            Box::new(|j: &mut Job| {
                j.id = "job-b".into();
                Ok(())
            }),
            &cancel,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(store.get_job("job-b", &cancel).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_one_job_all_apply() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn JobStore> = Arc::new(file_store(&dir, &FakeClock::new()).await);
    let cancel = CancellationToken::new();
    store.create_job(job("job-a", 10), &cancel).await.unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = Arc::clone(&store);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                store
                    .update_job(
                        "job-a",
                        Box::new(|j: &mut Job| {
                            j.num_started += 1;
                            Ok(())
                        }),
                        &cancel,
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get_job("job-a", &cancel).await.unwrap().num_started, 50);
}

#[tokio::test]
async fn cancelled_token_aborts_every_operation() {
    let store = memory_store(&FakeClock::new());
    let live = CancellationToken::new();
    store.create_job(job("job-a", 10), &live).await.unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = store.create_job(job("job-b", 1), &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    let err = store.get_job("job-a", &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    let err = store.update_job("job-a", bump_enqueued(1), &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    let err = store.delete_job("job-a", &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    let err = store.list_jobs(&cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);

    assert_eq!(store.backend().len(), 1);
    assert_eq!(store.get_job("job-a", &live).await.unwrap().num_enqueued, 0);
}

#[tokio::test]
async fn cancellation_while_waiting_for_the_lease() {
    let store = Arc::new(memory_store(&FakeClock::new()));
    let live = CancellationToken::new();
    store.create_job(job("job-a", 10), &live).await.unwrap();

    let held = store.leases.acquire("job-a").await;
    let cancel = CancellationToken::new();
    let waiter = {
        let store = Arc::clone(&store);
        let cancel = cancel.clone();
        tokio::spawn(async move { store.update_job("job-a", bump_enqueued(1), &cancel).await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();
    let err = waiter.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);

    drop(held);
    assert_eq!(store.get_job("job-a", &live).await.unwrap().num_enqueued, 0);
}
