// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runs a news worker with two readers that print each story as JSON.
//!
//! The log level comes from `NEWSCAST_LOG` (`trace`, `debug`, `info`, `warn`
//! or `error`; `info` when unset or unparsable).

use newscast::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing_subscriber::{filter::filter_fn, prelude::*};

const READERS: usize = 2;
const READER_CAPACITY: usize = 16;

fn setup_tracing() {
    let log_level = std::env::var("NEWSCAST_LOG")
        .ok()
        .and_then(|level| level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter_fn(move |metadata| metadata.level() <= &log_level))
        .try_init();
}

fn spawn_reader(
    id: usize,
    mut rx: mpsc::Receiver<Delivery<NewsItem>>,
) -> JoinHandle<anyhow::Result<usize>> {
    tokio::spawn(async move {
        let mut received = 0;
        while let Some(delivery) = rx.recv().await {
            match delivery {
                Delivery::Item(story) => {
                    received += 1;
                    println!("[reader {id}] {}", serde_json::to_string(&story)?);
                }
                Delivery::EndOfStream => {
                    tracing::info!("Reader {} reached end of stream", id);
                    break;
                }
            }
        }
        Ok(received)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let registry = ProducerRegistry::<NewsItem>::new();
    let mut readers = Vec::with_capacity(READERS);
    for id in 1..=READERS {
        let (tx, rx) = subscriber_channel(READER_CAPACITY);
        registry.add_subscriber(tx).await;
        readers.push(spawn_reader(id, rx));
    }

    let mut worker = NewsWorker::new(registry, NewsGenerator::new(), WorkerConfig::default());
    worker.start()?;
    let summary = worker.join(None).await?;
    tracing::info!(
        "Worker finished after {} stories ({:?})",
        summary.produced,
        summary.stop_reason
    );

    for (id, reader) in (1..).zip(readers) {
        let received = reader.await??;
        tracing::info!("Reader {} received {} stories", id, received);
    }
    Ok(())
}
