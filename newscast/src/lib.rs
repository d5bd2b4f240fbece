// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Newscast
//!
//! In-process fan-out of a periodically produced feed to a changing set of
//! subscriber queues.
//!
//! ## Overview
//!
//! A single [`ProducerWorker`] generates items on a fixed tick and hands each
//! one to a [`ProducerRegistry`], which delivers it to every queue registered
//! at that moment. When the worker stops, whether it reached its limit or was
//! asked to, every subscriber receives [`Delivery::EndOfStream`] exactly once
//! and knows to stop reading.
//!
//! - Subscribers join and leave at any time; a late subscriber only sees what
//!   is produced after it registers.
//! - Each queue receives items in production order.
//! - Delivery failures (full, timed out, closed) are dropped for that queue
//!   only and reported in a [`BroadcastReport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use newscast::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = ProducerRegistry::<NewsItem>::new();
//!     let (tx, mut rx) = subscriber_channel(16);
//!     registry.add_subscriber(tx).await;
//!
//!     let mut worker = NewsWorker::new(registry, NewsGenerator::new(), WorkerConfig::default());
//!     worker.start()?;
//!
//!     while let Some(Delivery::Item(story)) = rx.recv().await {
//!         println!("{}", story.headline);
//!     }
//!     worker.join(None).await?;
//!     Ok(())
//! }
//! ```

pub use newscast_core::{
    subscriber_channel, unbounded_subscriber_channel, BroadcastReport, Delivery, InsertPolicy,
    ProducerRegistry, StopSignal, SubscriberQueue, SupervisedTask,
};
pub use newscast_error::{
    DeliveryError, GenerateError, NewscastError, RegistryError, Result, WorkerError,
};
pub use newscast_producer::{
    ItemGenerator, NewsGenerator, NewsItem, NewsWorker, ProducerWorker, StopReason, WorkerConfig,
    WorkerState, WorkerSummary,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use newscast_core::{
        subscriber_channel, Delivery, InsertPolicy, ProducerRegistry, SubscriberQueue,
    };
    pub use newscast_error::NewscastError;
    pub use newscast_producer::{
        ItemGenerator, NewsGenerator, NewsItem, NewsWorker, ProducerWorker, WorkerConfig,
        WorkerState,
    };
}
