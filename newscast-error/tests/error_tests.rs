// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use newscast_error::{
    DeliveryError, GenerateError, NewscastError, RegistryError, Result, WorkerError,
};
use std::error::Error;
use std::io;
use std::time::Duration;

#[test]
fn test_registry_error_display() {
    assert_eq!(
        RegistryError::SubscriberNotFound.to_string(),
        "Subscriber not found: queue is not registered"
    );
    assert_eq!(
        RegistryError::Poisoned.to_string(),
        "Registry is poisoned: end-of-stream already sent"
    );
}

#[test]
fn test_delivery_error_display() {
    let err = DeliveryError::TimedOut {
        after: Duration::from_millis(250),
    };
    assert_eq!(err.to_string(), "Insertion timed out after 250ms");
    assert_eq!(DeliveryError::Full.to_string(), "Subscriber queue is full");
}

#[test]
fn test_delivery_error_is_transient() {
    assert!(DeliveryError::Full.is_transient());
    assert!(DeliveryError::TimedOut {
        after: Duration::from_secs(1)
    }
    .is_transient());
    assert!(!DeliveryError::Closed.is_transient());
}

#[test]
fn test_generate_error_keeps_source() {
    let err = GenerateError::with_source("clock unavailable", io::Error::other("no rtc"));
    assert_eq!(err.message(), "clock unavailable");
    assert_eq!(err.to_string(), "Item generation failed: clock unavailable");
    assert_eq!(err.source().map(ToString::to_string), Some("no rtc".into()));

    let bare = GenerateError::new("boom");
    assert!(bare.source().is_none());
}

#[test]
fn test_worker_error_from_generate_error() {
    let err: WorkerError = GenerateError::new("boom").into();
    assert!(matches!(err, WorkerError::Generator(_)));
    assert_eq!(err.to_string(), "Worker stopped: Item generation failed: boom");
}

#[test]
fn test_root_error_conversions() {
    fn remove() -> Result<()> {
        Err(RegistryError::SubscriberNotFound.into())
    }

    let err = remove().unwrap_err();
    assert!(matches!(
        err,
        NewscastError::Registry(RegistryError::SubscriberNotFound)
    ));
    assert_eq!(err.to_string(), "Subscriber not found: queue is not registered");
}

#[test]
fn test_is_recoverable() {
    assert!(NewscastError::from(DeliveryError::Full).is_recoverable());
    assert!(NewscastError::from(WorkerError::JoinTimeout {
        after: Duration::from_secs(2)
    })
    .is_recoverable());
    assert!(!NewscastError::from(DeliveryError::Closed).is_recoverable());
    assert!(NewscastError::from(RegistryError::Poisoned).is_permanent());
    assert!(NewscastError::from(WorkerError::panicked("abort")).is_permanent());
}
