// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Thread-safe fan-out of produced items to a dynamic set of subscriber queues.
//!
//! A [`ProducerRegistry`] delivers each item to every queue registered at the
//! moment the broadcast takes the lock, then ends every stream with a single
//! [`Delivery::EndOfStream`].
//!
//! ## Characteristics
//!
//! - **Hot**: a queue registered late only sees items produced after it joined.
//! - **Serialized**: registration, deregistration and broadcasts share one
//!   lock, held for the full broadcast. A queue never misses an item because it
//!   was removed halfway through a broadcast, and every queue sees items in
//!   `produce` order.
//! - **Head-of-line blocking**: a slow insertion delays every other caller of
//!   the same registry. Pick an [`InsertPolicy`] with a timeout to bound it.
//! - **Lossy on failure**: a rejected insertion is logged, counted in the
//!   [`BroadcastReport`] and dropped for that queue only. It is never retried.
//! - **Single poison**: the first [`poison`](ProducerRegistry::poison) ends
//!   every stream and drops every handle; later calls do nothing, `produce` is
//!   refused and a queue registered afterwards gets only the poison token.
//!
//! ## Example
//!
//! ```
//! use newscast_core::{subscriber_channel, Delivery, ProducerRegistry};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = ProducerRegistry::<u32>::new();
//! let (tx, mut rx) = subscriber_channel(8);
//!
//! registry.add_subscriber(tx).await;
//! registry.produce(1).await.unwrap();
//! registry.poison().await;
//!
//! assert_eq!(rx.recv().await, Some(Delivery::Item(1)));
//! assert_eq!(rx.recv().await, Some(Delivery::EndOfStream));
//! # }
//! ```

use crate::{Delivery, InsertPolicy, SubscriberQueue};
use core::marker::PhantomData;
use newscast_error::RegistryError;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

struct RegistryState<Q> {
    poisoned: bool,
    subscribers: Vec<Q>,
}

/// Outcome of one broadcast across the registered queues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Queues registered when the broadcast started
    pub attempted: usize,
    /// Insertions that succeeded
    pub delivered: usize,
    /// Insertions that failed and were dropped
    pub dropped: usize,
}

impl BroadcastReport {
    /// Returns `true` when every registered queue accepted the delivery.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

/// Fan-out registry shared between the producing task and any number of
/// registering callers.
///
/// Cloning is cheap; all clones share the same subscriber set and lock.
/// `Q` is the queue handle type, a bounded tokio sender by default.
///
/// See the [module documentation](self) for the delivery guarantees.
pub struct ProducerRegistry<T, Q = mpsc::Sender<Delivery<T>>> {
    state: Arc<Mutex<RegistryState<Q>>>,
    policy: InsertPolicy,
    _item: PhantomData<fn() -> T>,
}

impl<T, Q> ProducerRegistry<T, Q>
where
    T: Clone + Send + Sync + 'static,
    Q: SubscriberQueue<T>,
{
    /// Creates a registry that blocks on full queues without a timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(InsertPolicy::default())
    }

    /// Creates a registry inserting with `policy`.
    #[must_use]
    pub fn with_policy(policy: InsertPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState {
                poisoned: false,
                subscribers: Vec::new(),
            })),
            policy,
            _item: PhantomData,
        }
    }

    /// The insertion policy applied to every queue.
    #[must_use]
    pub const fn insert_policy(&self) -> InsertPolicy {
        self.policy
    }

    /// Registers `queue` for every later broadcast.
    ///
    /// Duplicates are not filtered: a handle added twice receives each
    /// delivery twice. A queue added after [`poison`](Self::poison) is not
    /// kept; it receives the poison token right away so its reader can stop.
    pub async fn add_subscriber(&self, queue: Q) {
        let mut state = self.state.lock().await;
        if state.poisoned {
            debug!("Subscriber registered after end-of-stream; sending poison only");
            if let Err(err) = queue.insert(Delivery::EndOfStream, self.policy).await {
                warn!("Dropped delivery to late subscriber: {}", err);
            }
            return;
        }
        state.subscribers.push(queue);
        debug!("Subscriber added ({} registered)", state.subscribers.len());
    }

    /// Unregisters the first handle feeding the same queue as `queue`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SubscriberNotFound`] when no registered handle
    /// matches; the subscriber set is left unchanged. After
    /// [`poison`](Self::poison) the set is empty, so every removal fails.
    pub async fn remove_subscriber(&self, queue: &Q) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;
        let index = state
            .subscribers
            .iter()
            .position(|registered| registered.same_queue(queue))
            .ok_or(RegistryError::SubscriberNotFound)?;

        state.subscribers.remove(index);
        debug!("Subscriber removed ({} registered)", state.subscribers.len());
        Ok(())
    }

    /// Number of registered queues.
    ///
    /// Read under the lock, but another caller may change the set right after;
    /// treat the value as a hint.
    pub async fn subscriber_count(&self) -> usize {
        self.state.lock().await.subscribers.len()
    }

    /// Returns `true` once [`poison`](Self::poison) has run.
    pub async fn is_poisoned(&self) -> bool {
        self.state.lock().await.poisoned
    }

    /// Delivers `item` to every registered queue.
    ///
    /// The lock is held until each insertion has succeeded or failed, so
    /// concurrent registration waits for the broadcast to finish. Failed
    /// insertions are dropped and counted in the report.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Poisoned`] after end-of-stream was sent.
    pub async fn produce(&self, item: T) -> Result<BroadcastReport, RegistryError> {
        let state = self.state.lock().await;
        if state.poisoned {
            return Err(RegistryError::Poisoned);
        }

        Ok(self
            .broadcast(&state.subscribers, || Delivery::Item(item.clone()))
            .await)
    }

    /// Delivers the poison token to every registered queue, then releases
    /// every handle so receivers observe their channel closing.
    ///
    /// Only the first call broadcasts; later calls return an empty report.
    pub async fn poison(&self) -> BroadcastReport {
        let mut state = self.state.lock().await;
        if state.poisoned {
            debug!("End-of-stream already sent; ignoring repeated poison");
            return BroadcastReport::default();
        }
        state.poisoned = true;

        let report = self
            .broadcast(&state.subscribers, || Delivery::EndOfStream)
            .await;
        state.subscribers.clear();
        report
    }

    /// The value [`poison`](Self::poison) delivers.
    #[must_use]
    pub const fn poison_value(&self) -> Delivery<T> {
        Delivery::EndOfStream
    }

    async fn broadcast<F>(&self, subscribers: &[Q], delivery: F) -> BroadcastReport
    where
        F: Fn() -> Delivery<T>,
    {
        let mut report = BroadcastReport {
            attempted: subscribers.len(),
            ..BroadcastReport::default()
        };

        for (index, queue) in subscribers.iter().enumerate() {
            match queue.insert(delivery(), self.policy).await {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    warn!("Dropped delivery to subscriber {}: {}", index, err);
                    report.dropped += 1;
                }
            }
        }

        report
    }
}

impl<T, Q> Default for ProducerRegistry<T, Q>
where
    T: Clone + Send + Sync + 'static,
    Q: SubscriberQueue<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Q> Clone for ProducerRegistry<T, Q> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            policy: self.policy,
            _item: PhantomData,
        }
    }
}
