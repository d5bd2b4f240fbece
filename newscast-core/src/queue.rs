// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The insertion contract a subscriber queue offers to the registry.
//!
//! A queue handle is the sending half of a FIFO channel. The registry keeps a
//! clone of the handle; the receiving half stays with whoever registered it.
//!
//! Implementations are provided for:
//!
//! - bounded [`tokio::sync::mpsc::Sender`]
//! - [`tokio::sync::mpsc::UnboundedSender`] (never full, policy is irrelevant)
//! - [`async_channel::Sender`], bounded or unbounded
//!
//! ## Example
//!
//! ```
//! use newscast_core::{subscriber_channel, Delivery, InsertPolicy, SubscriberQueue};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, mut rx) = subscriber_channel::<&str>(1);
//!
//! tx.insert(Delivery::Item("a"), InsertPolicy::NonBlocking).await.unwrap();
//! assert!(tx.insert(Delivery::Item("b"), InsertPolicy::NonBlocking).await.is_err());
//!
//! assert_eq!(rx.recv().await, Some(Delivery::Item("a")));
//! # }
//! ```

use crate::{Delivery, InsertPolicy};
use async_trait::async_trait;
use newscast_error::DeliveryError;
use tokio::sync::mpsc::{self, error::SendTimeoutError, error::TrySendError};

/// A FIFO queue the registry can insert deliveries into.
#[async_trait]
pub trait SubscriberQueue<T>: Send + Sync {
    /// Insert one delivery following `policy`.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::Full`] when a non-blocking insertion finds no capacity
    /// - [`DeliveryError::TimedOut`] when a blocking insertion exceeds its timeout
    /// - [`DeliveryError::Closed`] when the receiving half has been dropped
    async fn insert(&self, delivery: Delivery<T>, policy: InsertPolicy)
        -> Result<(), DeliveryError>;

    /// Returns `true` if both handles feed the same underlying queue.
    fn same_queue(&self, other: &Self) -> bool;
}

/// Bounded subscriber queue backed by a tokio channel.
///
/// # Panics
///
/// Panics if `capacity` is zero, as [`tokio::sync::mpsc::channel`] does.
#[must_use]
pub fn subscriber_channel<T>(
    capacity: usize,
) -> (mpsc::Sender<Delivery<T>>, mpsc::Receiver<Delivery<T>>) {
    mpsc::channel(capacity)
}

/// Unbounded subscriber queue backed by a tokio channel.
#[must_use]
pub fn unbounded_subscriber_channel<T>() -> (
    mpsc::UnboundedSender<Delivery<T>>,
    mpsc::UnboundedReceiver<Delivery<T>>,
) {
    mpsc::unbounded_channel()
}

#[async_trait]
impl<T: Send + 'static> SubscriberQueue<T> for mpsc::Sender<Delivery<T>> {
    async fn insert(
        &self,
        delivery: Delivery<T>,
        policy: InsertPolicy,
    ) -> Result<(), DeliveryError> {
        match policy {
            InsertPolicy::NonBlocking => self.try_send(delivery).map_err(|err| match err {
                TrySendError::Full(_) => DeliveryError::Full,
                TrySendError::Closed(_) => DeliveryError::Closed,
            }),
            InsertPolicy::Blocking { timeout: None } => self
                .send(delivery)
                .await
                .map_err(|_| DeliveryError::Closed),
            InsertPolicy::Blocking {
                timeout: Some(after),
            } => self
                .send_timeout(delivery, after)
                .await
                .map_err(|err| match err {
                    SendTimeoutError::Timeout(_) => DeliveryError::TimedOut { after },
                    SendTimeoutError::Closed(_) => DeliveryError::Closed,
                }),
        }
    }

    fn same_queue(&self, other: &Self) -> bool {
        self.same_channel(other)
    }
}

#[async_trait]
impl<T: Send + 'static> SubscriberQueue<T> for mpsc::UnboundedSender<Delivery<T>> {
    async fn insert(
        &self,
        delivery: Delivery<T>,
        _policy: InsertPolicy,
    ) -> Result<(), DeliveryError> {
        self.send(delivery).map_err(|_| DeliveryError::Closed)
    }

    fn same_queue(&self, other: &Self) -> bool {
        self.same_channel(other)
    }
}

#[async_trait]
impl<T: Send + 'static> SubscriberQueue<T> for async_channel::Sender<Delivery<T>> {
    async fn insert(
        &self,
        delivery: Delivery<T>,
        policy: InsertPolicy,
    ) -> Result<(), DeliveryError> {
        match policy {
            InsertPolicy::NonBlocking => self.try_send(delivery).map_err(|err| match err {
                async_channel::TrySendError::Full(_) => DeliveryError::Full,
                async_channel::TrySendError::Closed(_) => DeliveryError::Closed,
            }),
            InsertPolicy::Blocking { timeout: None } => self
                .send(delivery)
                .await
                .map_err(|_| DeliveryError::Closed),
            InsertPolicy::Blocking {
                timeout: Some(after),
            } => match tokio::time::timeout(after, self.send(delivery)).await {
                Ok(sent) => sent.map_err(|_| DeliveryError::Closed),
                Err(_) => Err(DeliveryError::TimedOut { after }),
            },
        }
    }

    fn same_queue(&self, other: &Self) -> bool {
        self.same_channel(other)
    }
}
