// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The periodic producer driving a [`ProducerRegistry`].
//!
//! A [`ProducerWorker`] owns one background task. Each tick it checks for a
//! stop request and for the item limit; if any subscriber is registered it
//! generates the next item and broadcasts it, then waits out the tick
//! interval. When it stops, for whatever reason, it broadcasts end-of-stream
//! exactly once. A panicking generator counts as a failing one.
//!
//! ## Stopping
//!
//! [`request_stop`](ProducerWorker::request_stop) is observed at the next tick
//! boundary. The interval wait is raced against the request, so a worker
//! leaves its wait as soon as a stop arrives; only a broadcast already in
//! flight delays it. [`join`](ProducerWorker::join) on its own does not stop
//! the worker: without a prior stop request it waits until the limit is
//! reached. [`shutdown`](ProducerWorker::shutdown) does both in the safe order.
//!
//! ## Example
//!
//! ```
//! use newscast_core::{subscriber_channel, ProducerRegistry};
//! use newscast_producer::{NewsGenerator, NewsItem, ProducerWorker, WorkerConfig};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = ProducerRegistry::<NewsItem>::new();
//! let (tx, _rx) = subscriber_channel(16);
//! registry.add_subscriber(tx).await;
//!
//! let config = WorkerConfig::default()
//!     .with_tick_interval(Duration::from_millis(5))
//!     .with_limit(3);
//! let mut worker = ProducerWorker::new(registry, NewsGenerator::new(), config);
//! worker.start().unwrap();
//!
//! let summary = worker.join(None).await.unwrap();
//! assert_eq!(summary.produced, 3);
//! # }
//! ```

use crate::{ItemGenerator, StopReason, WorkerConfig, WorkerState, WorkerSummary};
use newscast_core::{Delivery, ProducerRegistry, StopSignal, SubscriberQueue, SupervisedTask};
use newscast_error::{GenerateError, RegistryError, WorkerError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

type WorkerOutcome = Result<WorkerSummary, WorkerError>;

/// Drives a registry on a fixed schedule until a limit or a stop request.
///
/// See the [module documentation](self) for the tick semantics.
pub struct ProducerWorker<T, G, Q = mpsc::Sender<Delivery<T>>> {
    registry: ProducerRegistry<T, Q>,
    generator: Option<G>,
    config: WorkerConfig,
    stop: StopSignal,
    produced: Arc<AtomicU64>,
    state: Arc<watch::Sender<WorkerState>>,
    task: Option<SupervisedTask<WorkerOutcome>>,
}

impl<T, G, Q> ProducerWorker<T, G, Q>
where
    T: Clone + Send + Sync + 'static,
    G: ItemGenerator<T>,
    Q: SubscriberQueue<T> + 'static,
{
    /// Creates an idle worker; nothing runs until [`start`](Self::start).
    pub fn new(registry: ProducerRegistry<T, Q>, generator: G, config: WorkerConfig) -> Self {
        let (state, _) = watch::channel(WorkerState::Idle);
        Self {
            registry,
            generator: Some(generator),
            config,
            stop: StopSignal::new(),
            produced: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            task: None,
        }
    }

    /// Spawns the tick loop on the current tokio runtime.
    ///
    /// A stop requested while idle is honoured on the first tick: the worker
    /// poisons its subscribers without producing anything.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::AlreadyStarted`] if the worker left `Idle`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start(&mut self) -> Result<(), WorkerError> {
        let generator = self.generator.take().ok_or(WorkerError::AlreadyStarted)?;
        self.state.send_replace(WorkerState::Running);

        let ticks = TickLoop {
            registry: self.registry.clone(),
            generator,
            config: self.config,
            produced: Arc::clone(&self.produced),
            state: Arc::clone(&self.state),
        };
        self.task = Some(SupervisedTask::spawn_with_signal(
            self.stop.clone(),
            move |stop| ticks.run(stop),
        ));
        Ok(())
    }
}

impl<T, G, Q> ProducerWorker<T, G, Q> {
    /// Asks the worker to stop at its next tick boundary.
    ///
    /// Idempotent, and a no-op once the worker has terminated.
    pub fn request_stop(&self) {
        if self.stop.request() {
            debug!("Stop requested while {}", self.state());
        }
    }

    /// Waits for the worker to terminate and returns its outcome.
    ///
    /// With a timeout the wait gives up once it elapses; the worker keeps
    /// running and `join` may be retried.
    ///
    /// # Errors
    ///
    /// - [`WorkerError::NotStarted`] if [`start`](Self::start) was never called
    /// - [`WorkerError::JoinTimeout`] when the timeout elapses first
    /// - [`WorkerError::AlreadyJoined`] when the outcome was already taken
    /// - [`WorkerError::Generator`] when the generator failed or panicked, or
    ///   [`WorkerError::Registry`] when the registry was poisoned elsewhere;
    ///   subscribers were still poisoned
    /// - [`WorkerError::Panicked`] if the task panicked
    pub async fn join(&mut self, timeout: Option<Duration>) -> WorkerOutcome {
        let task = self.task.as_mut().ok_or(WorkerError::NotStarted)?;
        task.join(timeout).await?
    }

    /// Requests a stop, then joins.
    ///
    /// Returns within one tick interval plus any broadcast in flight.
    ///
    /// # Errors
    ///
    /// Same as [`join`](Self::join).
    pub async fn shutdown(&mut self, timeout: Option<Duration>) -> WorkerOutcome {
        self.request_stop();
        self.join(timeout).await
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// A receiver notified on every state transition.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<WorkerState> {
        self.state.subscribe()
    }

    /// Resolves once the worker reaches `Terminated`.
    ///
    /// Any number of callers may wait concurrently. Never resolves for a
    /// worker that is not started.
    pub async fn wait_terminated(&self) {
        let mut state = self.state.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail.
        let _ = state.wait_for(WorkerState::is_terminated).await;
    }

    /// Items broadcast so far.
    #[must_use]
    pub fn produced_count(&self) -> u64 {
        self.produced.load(Ordering::Acquire)
    }

    /// The registry this worker broadcasts to.
    #[must_use]
    pub const fn registry(&self) -> &ProducerRegistry<T, Q> {
        &self.registry
    }

    /// The schedule and limit this worker was created with.
    #[must_use]
    pub const fn config(&self) -> &WorkerConfig {
        &self.config
    }
}

struct TickLoop<T, G, Q> {
    registry: ProducerRegistry<T, Q>,
    generator: G,
    config: WorkerConfig,
    produced: Arc<AtomicU64>,
    state: Arc<watch::Sender<WorkerState>>,
}

// Publishes `Terminated` however the task ends, even if it unwinds.
struct TerminateOnExit(Arc<watch::Sender<WorkerState>>);

impl Drop for TerminateOnExit {
    fn drop(&mut self) {
        self.0.send_replace(WorkerState::Terminated);
    }
}

impl<T, G, Q> TickLoop<T, G, Q>
where
    T: Clone + Send + Sync + 'static,
    G: ItemGenerator<T>,
    Q: SubscriberQueue<T> + 'static,
{
    async fn run(mut self, stop: StopSignal) -> WorkerOutcome {
        let _terminated = TerminateOnExit(Arc::clone(&self.state));

        let outcome = self.produce_until_stopped(&stop).await;

        self.state.send_replace(WorkerState::Stopping);
        info!("Sending poison pill!");
        self.registry.poison().await;

        outcome.map(|stop_reason| WorkerSummary {
            produced: self.produced.load(Ordering::Acquire),
            stop_reason,
        })
    }

    async fn produce_until_stopped(
        &mut self,
        stop: &StopSignal,
    ) -> Result<StopReason, WorkerError> {
        loop {
            if stop.is_requested() {
                return Ok(StopReason::StopRequested);
            }

            let produced = self.produced.load(Ordering::Acquire);
            if produced >= self.config.limit() {
                return Ok(StopReason::LimitReached);
            }

            // Poisoning empties the subscriber set, so check it first.
            if self.registry.is_poisoned().await {
                return Err(RegistryError::Poisoned.into());
            }

            if self.registry.subscriber_count().await > 0 {
                let sequence = produced + 1;
                info!("Producing news: {}", sequence);

                let item = self.generate(sequence).map_err(|err| {
                    error!("Generator failed for item {}: {}", sequence, err);
                    err
                })?;
                self.registry.produce(item).await?;
                self.produced.store(sequence, Ordering::Release);
            }

            tokio::select! {
                () = stop.wait() => {}
                () = tokio::time::sleep(self.config.tick_interval()) => {}
            }
        }
    }

    // A panicking generator is reported like a failing one, so the loop
    // still reaches the poison broadcast.
    fn generate(&self, sequence: u64) -> Result<T, GenerateError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.generator.generate(sequence))).unwrap_or_else(
            |payload| {
                Err(GenerateError::new(format!(
                    "generator panicked on item {sequence}: {}",
                    panic_message(payload.as_ref())
                )))
            },
        )
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
