// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Newscast fan-out producer
//!
//! Failures fall into three families, each with its own type:
//!
//! - [`RegistryError`]: registration misuse, surfaced to the caller immediately
//! - [`DeliveryError`]: a single subscriber rejected an insertion; the registry
//!   swallows it for that subscriber and keeps broadcasting
//! - [`GenerateError`] and [`WorkerError`]: failures of the producing task
//!
//! [`NewscastError`] is the root type that any of them converts into.
//!
//! # Examples
//!
//! ```
//! use newscast_error::{NewscastError, RegistryError, Result};
//!
//! fn unregister() -> Result<()> {
//!     Err(RegistryError::SubscriberNotFound.into())
//! }
//!
//! assert!(matches!(
//!     unregister(),
//!     Err(NewscastError::Registry(RegistryError::SubscriberNotFound))
//! ));
//! ```

use std::time::Duration;

/// Errors raised by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The queue passed to `remove_subscriber` is not currently registered.
    ///
    /// Either it was never added or it has already been removed.
    #[error("Subscriber not found: queue is not registered")]
    SubscriberNotFound,

    /// The registry has already broadcast its poison token.
    ///
    /// No further items may be produced once end-of-stream was signalled.
    #[error("Registry is poisoned: end-of-stream already sent")]
    Poisoned,
}

/// A single subscriber queue refused an insertion.
///
/// The registry never propagates these out of a broadcast; they are logged and
/// counted in the broadcast report instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// Non-blocking insertion found the queue at capacity.
    #[error("Subscriber queue is full")]
    Full,

    /// Blocking insertion did not find capacity before the timeout elapsed.
    #[error("Insertion timed out after {after:?}")]
    TimedOut {
        /// How long the insertion waited
        after: Duration,
    },

    /// The receiving half of the queue has been dropped.
    #[error("Subscriber queue is closed: receiver dropped")]
    Closed,
}

impl DeliveryError {
    /// Returns `true` when the same queue could accept a later insertion.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Full | Self::TimedOut { .. })
    }
}

/// The item generator failed to build the item for a sequence number.
#[derive(Debug, thiserror::Error)]
#[error("Item generation failed: {message}")]
pub struct GenerateError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GenerateError {
    /// Create a generator error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generator error wrapping the underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The human readable description
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the producer worker's control surface.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// `start` was called on a worker that is no longer idle.
    #[error("Worker already started")]
    AlreadyStarted,

    /// `join` was called before `start`.
    #[error("Worker has not been started")]
    NotStarted,

    /// The worker was already joined and its outcome consumed.
    #[error("Worker has already been joined")]
    AlreadyJoined,

    /// The worker did not terminate within the join timeout.
    ///
    /// The worker keeps running; `join` may be called again.
    #[error("Worker did not terminate within {after:?}")]
    JoinTimeout {
        /// The timeout that elapsed
        after: Duration,
    },

    /// The generator failed; the loop ended after poisoning subscribers.
    #[error("Worker stopped: {0}")]
    Generator(#[from] GenerateError),

    /// A registry operation failed inside the loop.
    #[error("Worker stopped: {0}")]
    Registry(#[from] RegistryError),

    /// The worker task panicked or was aborted by the runtime.
    #[error("Worker task failed: {context}")]
    Panicked {
        /// Information reported by the runtime
        context: String,
    },
}

impl WorkerError {
    /// Create a panic error with the given context
    pub fn panicked(context: impl Into<String>) -> Self {
        Self::Panicked {
            context: context.into(),
        }
    }
}

/// Root error type for all Newscast operations
#[derive(Debug, thiserror::Error)]
pub enum NewscastError {
    /// See [`RegistryError`]
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// See [`DeliveryError`]
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// See [`GenerateError`]
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// See [`WorkerError`]
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

impl NewscastError {
    /// Check if this is a recoverable error
    ///
    /// Transient delivery failures and join timeouts may succeed on retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Delivery(err) => err.is_transient(),
            Self::Worker(WorkerError::JoinTimeout { .. }) => true,
            _ => false,
        }
    }

    /// Check if this error indicates a permanent failure
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        !self.is_recoverable()
    }
}

/// Specialized Result type for Newscast operations
///
/// ```
/// use newscast_error::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, NewscastError>;
