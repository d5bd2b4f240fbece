// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

/// Default pause between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Default number of items produced before the worker poisons its subscribers.
pub const DEFAULT_LIMIT: u64 = 10;

/// Schedule and stopping condition of a [`ProducerWorker`](crate::ProducerWorker).
///
/// ```
/// use newscast_producer::WorkerConfig;
/// use std::time::Duration;
///
/// let config = WorkerConfig::default()
///     .with_tick_interval(Duration::from_millis(100))
///     .with_limit(3);
///
/// assert_eq!(config.limit(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    tick_interval: Duration,
    limit: u64,
}

impl WorkerConfig {
    /// Wait `interval` after every tick, productive or not.
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Stop after `limit` items. Zero poisons on the first tick.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            limit: DEFAULT_LIMIT,
        }
    }
}
