// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use newscast_core::{StopSignal, SupervisedTask, WorkerError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// StopSignal
// ============================================================================

#[test]
fn test_new_signal_not_requested() {
    let signal = StopSignal::new();
    assert!(!signal.is_requested());
}

#[test]
fn test_request_is_idempotent_and_reports_first_call() {
    let signal = StopSignal::new();

    assert!(signal.request());
    assert!(!signal.request());
    assert!(!signal.request());
    assert!(signal.is_requested());
}

#[test]
fn test_clones_share_state() {
    let signal = StopSignal::new();
    let clone = signal.clone();

    clone.request();

    assert!(signal.is_requested());
}

#[tokio::test]
async fn test_wait_returns_immediately_when_already_requested() {
    let signal = StopSignal::new();
    signal.request();

    tokio::time::timeout(Duration::from_millis(10), signal.wait())
        .await
        .expect("wait should resolve immediately");
}

#[tokio::test]
async fn test_every_waiter_is_woken() {
    let signal = StopSignal::new();
    let woken = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];
    for _ in 0..10 {
        let signal = signal.clone();
        let woken = woken.clone();
        handles.push(tokio::spawn(async move {
            signal.wait().await;
            woken.fetch_add(1, Ordering::SeqCst);
        }));
    }

    tokio::time::sleep(Duration::from_millis(10)).await;
    signal.request();

    for handle in handles {
        tokio::time::timeout(Duration::from_millis(100), handle)
            .await
            .expect("waiter should wake")
            .expect("waiter should not panic");
    }
    assert_eq!(woken.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_request_racing_with_wait_registration() {
    for _ in 0..100 {
        let signal = StopSignal::new();
        let waiter = signal.clone();

        let handle = tokio::spawn(async move { waiter.wait().await });
        signal.request();

        let result = tokio::time::timeout(Duration::from_millis(100), handle).await;
        assert!(result.is_ok(), "waiter missed the stop request");
    }
}

// ============================================================================
// SupervisedTask
// ============================================================================

#[tokio::test]
async fn test_task_stops_on_request_and_returns_output() -> anyhow::Result<()> {
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let mut task = SupervisedTask::spawn(|stop| async move {
        while !stop.is_requested() {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        counter.load(Ordering::SeqCst)
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    task.request_stop();
    let final_count = task.join(Some(Duration::from_millis(100))).await?;

    assert!(task.is_stop_requested());
    assert!(task.is_finished());
    assert!(final_count >= 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_join_timeout_leaves_task_running() {
    let mut task = SupervisedTask::spawn(|stop| async move {
        stop.wait().await;
        42
    });

    let err = task
        .join(Some(Duration::from_millis(50)))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkerError::JoinTimeout { .. }));
    assert!(!task.is_finished());

    task.request_stop();
    assert_eq!(task.join(None).await.unwrap(), 42);
}

#[tokio::test]
async fn test_second_join_reports_already_joined() {
    let mut task = SupervisedTask::spawn(|_stop| async move { 1 });

    assert_eq!(task.join(None).await.unwrap(), 1);
    assert!(matches!(
        task.join(None).await.unwrap_err(),
        WorkerError::AlreadyJoined
    ));
}

#[tokio::test]
async fn test_panicking_task_surfaces_as_error() {
    let mut task = SupervisedTask::spawn(|_stop| async move {
        panic!("generator exploded");
    });

    let err: WorkerError = task.join(None).await.unwrap_err();
    assert!(matches!(err, WorkerError::Panicked { .. }));
}

#[tokio::test]
async fn test_drop_requests_stop() {
    let signal = StopSignal::new();
    let observed = signal.clone();

    let task = SupervisedTask::spawn_with_signal(signal, |stop| async move {
        stop.wait().await;
    });
    drop(task);

    assert!(observed.is_requested());
}

#[tokio::test]
async fn test_stop_requested_before_spawn_is_visible() -> anyhow::Result<()> {
    let signal = StopSignal::new();
    signal.request();

    let mut task =
        SupervisedTask::spawn_with_signal(signal, |stop| async move { stop.is_requested() });

    assert!(task.join(None).await?);
    Ok(())
}
