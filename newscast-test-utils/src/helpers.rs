// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use newscast_core::Delivery;
use newscast_error::GenerateError;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Receive the next delivery, or `None` if nothing arrives within `timeout_ms`.
pub async fn recv_timeout<T>(rx: &mut mpsc::Receiver<T>, timeout_ms: u64) -> Option<T> {
    timeout(Duration::from_millis(timeout_ms), rx.recv())
        .await
        .ok()
        .flatten()
}

/// Panics if anything arrives on `rx` within `timeout_ms`.
pub async fn assert_no_recv<T: std::fmt::Debug>(rx: &mut mpsc::Receiver<T>, timeout_ms: u64) {
    if let Ok(Some(unexpected)) = timeout(Duration::from_millis(timeout_ms), rx.recv()).await {
        panic!("Unexpected delivery, expected no output: {unexpected:?}");
    }
}

/// Drain items until the poison token arrives.
///
/// # Panics
///
/// Panics if the channel closes before end-of-stream is received.
pub async fn collect_until_poison<T>(rx: &mut mpsc::Receiver<Delivery<T>>) -> Vec<T> {
    let mut items = Vec::new();
    loop {
        match rx.recv().await {
            Some(Delivery::Item(item)) => items.push(item),
            Some(Delivery::EndOfStream) => return items,
            None => panic!("channel closed before end-of-stream"),
        }
    }
}

/// Drain whatever is buffered right now without waiting.
pub fn drain_ready<T>(rx: &mut mpsc::Receiver<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(next) = rx.try_recv() {
        out.push(next);
    }
    out
}

/// Generator closure that yields `make(n)` but fails on sequence `fail_on`.
///
/// Usable wherever an `ItemGenerator` is expected.
pub fn fail_at<T, F>(
    fail_on: u64,
    make: F,
) -> impl Fn(u64) -> Result<T, GenerateError> + Send + 'static
where
    T: 'static,
    F: Fn(u64) -> T + Send + 'static,
{
    move |sequence| {
        if sequence == fail_on {
            Err(GenerateError::new(format!("generator failed on {sequence}")))
        } else {
            Ok(make(sequence))
        }
    }
}
