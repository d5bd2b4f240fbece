// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscriber queue fixtures that record or refuse insertions.

use async_trait::async_trait;
use newscast_core::{Delivery, InsertPolicy, SubscriberQueue};
use newscast_error::DeliveryError;
use parking_lot::Mutex;
use std::sync::Arc;

/// A queue that accepts everything and remembers each insertion and the
/// policy it was made with.
#[derive(Debug)]
pub struct RecordingQueue<T> {
    log: Arc<Mutex<Vec<(Delivery<T>, InsertPolicy)>>>,
}

impl<T: Clone> RecordingQueue<T> {
    /// A fresh, empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of insertions attempted so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.log.lock().len()
    }

    /// Every delivery received, in order.
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery<T>> {
        self.log.lock().iter().map(|(d, _)| d.clone()).collect()
    }

    /// Items received, without the poison token.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.log
            .lock()
            .iter()
            .filter_map(|(d, _)| d.item().cloned())
            .collect()
    }

    /// Number of poison tokens received.
    #[must_use]
    pub fn poison_count(&self) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|(d, _)| d.is_end_of_stream())
            .count()
    }

    /// Policies each insertion was made with.
    #[must_use]
    pub fn policies(&self) -> Vec<InsertPolicy> {
        self.log.lock().iter().map(|(_, p)| *p).collect()
    }
}

impl<T: Clone> Default for RecordingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingQueue<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

#[async_trait]
impl<T: Send + 'static> SubscriberQueue<T> for RecordingQueue<T> {
    async fn insert(
        &self,
        delivery: Delivery<T>,
        policy: InsertPolicy,
    ) -> Result<(), DeliveryError> {
        self.log.lock().push((delivery, policy));
        Ok(())
    }

    fn same_queue(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.log, &other.log)
    }
}

/// A queue that never has capacity.
///
/// Non-blocking inserts fail with `Full`; blocking inserts wait out their
/// timeout and fail with `TimedOut`. A blocking insert without a timeout never
/// completes, so only use this fixture with a bounded policy.
#[derive(Debug, Clone, Default)]
pub struct StalledQueue {
    attempts: Arc<Mutex<usize>>,
}

impl StalledQueue {
    /// A fresh stalled queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insertions attempted so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl<T: Send + 'static> SubscriberQueue<T> for StalledQueue {
    async fn insert(
        &self,
        _delivery: Delivery<T>,
        policy: InsertPolicy,
    ) -> Result<(), DeliveryError> {
        *self.attempts.lock() += 1;
        match policy {
            InsertPolicy::NonBlocking => Err(DeliveryError::Full),
            InsertPolicy::Blocking {
                timeout: Some(after),
            } => {
                tokio::time::sleep(after).await;
                Err(DeliveryError::TimedOut { after })
            }
            InsertPolicy::Blocking { timeout: None } => {
                std::future::pending::<()>().await;
                Err(DeliveryError::Full)
            }
        }
    }

    fn same_queue(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.attempts, &other.attempts)
    }
}
