// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning with cooperative stop and a joinable outcome.

use crate::StopSignal;
use core::future::Future;
use newscast_error::WorkerError;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A spawned tokio task paired with the [`StopSignal`] it watches.
///
/// The closure given to [`spawn`](Self::spawn) receives a clone of the signal
/// and is expected to return once it observes a request. Dropping the
/// `SupervisedTask` requests a stop but does not wait for the task.
///
/// # Example
///
/// ```rust
/// use newscast_core::SupervisedTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut task = SupervisedTask::spawn(|stop| async move {
///     stop.wait().await;
///     "stopped"
/// });
///
/// task.request_stop();
/// assert_eq!(task.join(None).await.unwrap(), "stopped");
/// # }
/// ```
#[derive(Debug)]
pub struct SupervisedTask<R> {
    stop: StopSignal,
    handle: Option<JoinHandle<R>>,
}

impl<R: Send + 'static> SupervisedTask<R> {
    /// Spawn `f` on the current tokio runtime with a fresh stop signal.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(StopSignal) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self::spawn_with_signal(StopSignal::new(), f)
    }

    /// Spawn `f` watching an existing signal.
    ///
    /// Lets a controller hand out the signal before the task exists; a stop
    /// requested earlier is visible to the task at its first checkpoint.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn_with_signal<F, Fut>(stop: StopSignal, f: F) -> Self
    where
        F: FnOnce(StopSignal) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        let handle = tokio::spawn(f(stop.clone()));
        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl<R> SupervisedTask<R> {
    /// Ask the task to stop at its next checkpoint. Idempotent.
    pub fn request_stop(&self) {
        self.stop.request();
    }

    /// Returns `true` once a stop has been requested.
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_requested()
    }

    /// The signal shared with the task.
    #[must_use]
    pub const fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Returns `true` if the task has completed or was already joined.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the task's output.
    ///
    /// Does not request a stop. With a timeout, the wait gives up once it
    /// elapses and the task keeps running; `join` can be called again.
    ///
    /// # Errors
    ///
    /// - [`WorkerError::JoinTimeout`] when the timeout elapses first
    /// - [`WorkerError::AlreadyJoined`] when the output was already taken
    /// - [`WorkerError::Panicked`] when the task panicked or was aborted
    pub async fn join(&mut self, timeout: Option<Duration>) -> Result<R, WorkerError> {
        let handle = self.handle.as_mut().ok_or(WorkerError::AlreadyJoined)?;

        let outcome = match timeout {
            Some(after) => tokio::time::timeout(after, handle)
                .await
                .map_err(|_| WorkerError::JoinTimeout { after })?,
            None => handle.await,
        };

        self.handle = None;
        outcome.map_err(|err| WorkerError::panicked(err.to_string()))
    }
}

impl<R> Drop for SupervisedTask<R> {
    fn drop(&mut self) {
        self.stop.request();
    }
}
