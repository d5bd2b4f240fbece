// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Newscast workspace.
//!
//! Development and testing only.
//!
//! - `helpers`: async receive/assert helpers for tokio subscriber channels and
//!   the [`fail_at`] generator fixture
//! - `queues`: [`RecordingQueue`] and [`StalledQueue`] subscriber fixtures

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod queues;

pub use helpers::{assert_no_recv, collect_until_poison, drain_ready, fail_at, recv_timeout};
pub use queues::{RecordingQueue, StalledQueue};
