// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Periodic producer for Newscast registries.
//!
//! [`ProducerWorker`] ticks on a [`WorkerConfig`] schedule, asks an
//! [`ItemGenerator`] for the next item whenever someone is subscribed, and
//! broadcasts it. On stop it sends end-of-stream exactly once.
//! [`NewsGenerator`] produces the placeholder [`NewsItem`] stories.

#[macro_use]
mod logging;

pub mod config;
pub mod generator;
pub mod news;
pub mod state;
pub mod worker;

pub use self::config::{WorkerConfig, DEFAULT_LIMIT, DEFAULT_TICK_INTERVAL};
pub use self::generator::ItemGenerator;
pub use self::news::{NewsGenerator, NewsItem};
pub use self::state::{StopReason, WorkerState, WorkerSummary};
pub use self::worker::ProducerWorker;

/// A worker broadcasting [`NewsItem`]s from a [`NewsGenerator`].
pub type NewsWorker<Q = tokio::sync::mpsc::Sender<newscast_core::Delivery<NewsItem>>> =
    ProducerWorker<NewsItem, NewsGenerator, Q>;
