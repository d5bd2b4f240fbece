// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative stop request shared between a task and its controllers.

use event_listener::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A one-way flag that asks a background task to stop.
///
/// Clones share the same flag. The flag is set at most once; later requests
/// are no-ops. The task checks [`is_requested`](Self::is_requested) at its
/// checkpoints and can race [`wait`](Self::wait) against its own sleeps to
/// leave a wait early.
///
/// ```
/// use newscast_core::StopSignal;
///
/// let signal = StopSignal::new();
/// let controller = signal.clone();
///
/// assert!(controller.request());
/// assert!(!controller.request());
/// assert!(signal.is_requested());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    event: Event,
}

impl StopSignal {
    /// Create a signal that has not been requested yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the stop and wake every waiter.
    ///
    /// Returns `true` only for the call that actually set the flag.
    pub fn request(&self) -> bool {
        let first = !self.inner.requested.swap(true, Ordering::AcqRel);
        if first {
            self.inner.event.notify(usize::MAX);
        }
        first
    }

    /// Check the flag without waiting.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }

    /// Resolve once a stop has been requested.
    ///
    /// Returns immediately if the flag is already set.
    pub async fn wait(&self) {
        loop {
            if self.is_requested() {
                return;
            }

            let listener = self.inner.event.listen();

            // A request may have landed between the check and `listen()`.
            if self.is_requested() {
                return;
            }

            listener.await;
        }
    }
}
