// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use std::time::Duration;

/// How the registry inserts into each subscriber queue during a broadcast.
///
/// The registry holds its lock for the whole broadcast, so a blocking policy
/// without a timeout lets one full queue stall every other registry caller.
/// Use [`InsertPolicy::NonBlocking`] or a bounded timeout to isolate slow
/// subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertPolicy {
    /// Attempt once; a full queue fails immediately.
    NonBlocking,
    /// Wait for capacity, for at most `timeout` when one is given.
    Blocking {
        /// Upper bound on the wait, `None` waits indefinitely
        timeout: Option<Duration>,
    },
}

impl InsertPolicy {
    /// Blocking insertion that gives up after `timeout`.
    #[must_use]
    pub const fn blocking_with_timeout(timeout: Duration) -> Self {
        Self::Blocking {
            timeout: Some(timeout),
        }
    }

    /// Returns the timeout of a blocking policy.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self {
            Self::NonBlocking => None,
            Self::Blocking { timeout } => *timeout,
        }
    }
}

impl Default for InsertPolicy {
    fn default() -> Self {
        Self::Blocking { timeout: None }
    }
}

impl fmt::Display for InsertPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonBlocking => write!(f, "non-blocking"),
            Self::Blocking { timeout: None } => write!(f, "blocking"),
            Self::Blocking {
                timeout: Some(timeout),
            } => write!(f, "blocking (timeout {timeout:?})"),
        }
    }
}
