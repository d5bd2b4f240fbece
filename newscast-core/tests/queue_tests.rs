// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use newscast_core::{
    subscriber_channel, unbounded_subscriber_channel, Delivery, DeliveryError, InsertPolicy,
    SubscriberQueue,
};
use std::time::Duration;

// ============================================================================
// tokio bounded sender
// ============================================================================

#[tokio::test]
async fn test_bounded_non_blocking_reports_full() {
    let (tx, _rx) = subscriber_channel::<u32>(1);

    tx.insert(Delivery::Item(1), InsertPolicy::NonBlocking)
        .await
        .unwrap();
    let err = tx
        .insert(Delivery::Item(2), InsertPolicy::NonBlocking)
        .await
        .unwrap_err();

    assert_eq!(err, DeliveryError::Full);
}

#[tokio::test(start_paused = true)]
async fn test_bounded_blocking_times_out() {
    let (tx, _rx) = subscriber_channel::<u32>(1);
    let policy = InsertPolicy::blocking_with_timeout(Duration::from_millis(50));

    tx.insert(Delivery::Item(1), policy).await.unwrap();
    let err = tx.insert(Delivery::Item(2), policy).await.unwrap_err();

    assert_eq!(
        err,
        DeliveryError::TimedOut {
            after: Duration::from_millis(50)
        }
    );
}

#[tokio::test]
async fn test_bounded_blocking_waits_for_capacity() -> anyhow::Result<()> {
    let (tx, mut rx) = subscriber_channel::<u32>(1);
    tx.insert(Delivery::Item(1), InsertPolicy::default()).await?;

    let sender = tx.clone();
    let pending = tokio::spawn(async move {
        sender
            .insert(Delivery::Item(2), InsertPolicy::default())
            .await
    });

    assert_eq!(rx.recv().await, Some(Delivery::Item(1)));
    pending.await??;
    assert_eq!(rx.recv().await, Some(Delivery::Item(2)));
    Ok(())
}

#[tokio::test]
async fn test_bounded_closed_receiver() {
    let (tx, rx) = subscriber_channel::<u32>(4);
    drop(rx);

    for policy in [
        InsertPolicy::NonBlocking,
        InsertPolicy::default(),
        InsertPolicy::blocking_with_timeout(Duration::from_millis(10)),
    ] {
        let err = tx.insert(Delivery::EndOfStream, policy).await.unwrap_err();
        assert_eq!(err, DeliveryError::Closed);
    }
}

#[tokio::test]
async fn test_bounded_same_queue_is_channel_identity() {
    let (a, _ra) = subscriber_channel::<u32>(1);
    let (b, _rb) = subscriber_channel::<u32>(1);

    assert!(a.same_queue(&a.clone()));
    assert!(!a.same_queue(&b));
}

// ============================================================================
// tokio unbounded sender
// ============================================================================

#[tokio::test]
async fn test_unbounded_ignores_policy() -> anyhow::Result<()> {
    let (tx, mut rx) = unbounded_subscriber_channel::<u32>();

    for n in 0..100 {
        tx.insert(Delivery::Item(n), InsertPolicy::NonBlocking)
            .await?;
    }

    let mut received = 0;
    while let Ok(Delivery::Item(_)) = rx.try_recv() {
        received += 1;
    }
    assert_eq!(received, 100);
    Ok(())
}

#[tokio::test]
async fn test_unbounded_closed_receiver() {
    let (tx, rx) = unbounded_subscriber_channel::<u32>();
    drop(rx);

    let err = tx
        .insert(Delivery::Item(1), InsertPolicy::default())
        .await
        .unwrap_err();
    assert_eq!(err, DeliveryError::Closed);
}

// ============================================================================
// async-channel sender
// ============================================================================

#[tokio::test]
async fn test_async_channel_non_blocking_reports_full() {
    let (tx, _rx) = async_channel::bounded::<Delivery<u32>>(1);

    tx.insert(Delivery::Item(1), InsertPolicy::NonBlocking)
        .await
        .unwrap();
    let err = tx
        .insert(Delivery::Item(2), InsertPolicy::NonBlocking)
        .await
        .unwrap_err();

    assert_eq!(err, DeliveryError::Full);
}

#[tokio::test(start_paused = true)]
async fn test_async_channel_blocking_times_out() {
    let (tx, _rx) = async_channel::bounded::<Delivery<u32>>(1);
    let policy = InsertPolicy::blocking_with_timeout(Duration::from_millis(30));

    tx.insert(Delivery::Item(1), policy).await.unwrap();
    let err = tx.insert(Delivery::Item(2), policy).await.unwrap_err();

    assert!(matches!(err, DeliveryError::TimedOut { .. }));
}

#[tokio::test]
async fn test_async_channel_round_trip_and_identity() -> anyhow::Result<()> {
    let (tx, rx) = async_channel::unbounded::<Delivery<&str>>();
    let (other, _other_rx) = async_channel::unbounded::<Delivery<&str>>();

    tx.insert(Delivery::Item("a"), InsertPolicy::default())
        .await?;
    tx.insert(Delivery::EndOfStream, InsertPolicy::default())
        .await?;

    assert_eq!(rx.recv().await?, Delivery::Item("a"));
    assert_eq!(rx.recv().await?, Delivery::EndOfStream);
    assert!(tx.same_queue(&tx.clone()));
    assert!(!tx.same_queue(&other));
    Ok(())
}

#[tokio::test]
async fn test_async_channel_closed_receiver() {
    let (tx, rx) = async_channel::bounded::<Delivery<u32>>(2);
    drop(rx);

    let err = tx
        .insert(Delivery::Item(1), InsertPolicy::NonBlocking)
        .await
        .unwrap_err();
    assert_eq!(err, DeliveryError::Closed);
}

#[test]
fn test_policy_display_and_timeout() {
    let bounded = InsertPolicy::blocking_with_timeout(Duration::from_secs(1));

    assert_eq!(InsertPolicy::default().to_string(), "blocking");
    assert_eq!(InsertPolicy::NonBlocking.to_string(), "non-blocking");
    assert_eq!(bounded.to_string(), "blocking (timeout 1s)");
    assert_eq!(bounded.timeout(), Some(Duration::from_secs(1)));
    assert_eq!(InsertPolicy::NonBlocking.timeout(), None);
}
