// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Lifecycle of a producer worker.
///
/// Transitions only move forward:
/// `Idle -> Running -> Stopping -> Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkerState {
    /// Created, not started
    Idle,
    /// Ticking and producing
    Running,
    /// Broadcasting end-of-stream
    Stopping,
    /// Finished; no further ticks
    Terminated,
}

impl WorkerState {
    /// Returns `true` for the final `Terminated` state.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Why a worker stopped producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of items was produced
    LimitReached,
    /// A stop was requested before the limit
    StopRequested,
}

/// Outcome of a worker that terminated without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    /// Items broadcast before stopping
    pub produced: u64,
    pub stop_reason: StopReason,
}
