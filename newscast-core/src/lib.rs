// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core fan-out primitives for Newscast.
//!
//! - [`ProducerRegistry`]: serialized broadcast to a dynamic set of queues
//! - [`SubscriberQueue`]: the insertion contract a queue offers the registry
//! - [`Delivery`]: an item or the end-of-stream poison token
//! - [`SupervisedTask`] and [`StopSignal`]: spawning a producer loop that can
//!   be stopped cooperatively and joined

#[macro_use]
mod logging;

pub mod delivery;
pub mod policy;
pub mod queue;
pub mod registry;
pub mod stop_signal;
pub mod task;

pub use self::delivery::Delivery;
pub use self::policy::InsertPolicy;
pub use self::queue::{subscriber_channel, unbounded_subscriber_channel, SubscriberQueue};
pub use self::registry::{BroadcastReport, ProducerRegistry};
pub use self::stop_signal::StopSignal;
pub use self::task::SupervisedTask;
pub use newscast_error::{DeliveryError, RegistryError, WorkerError};
