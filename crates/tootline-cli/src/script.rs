//! Scripted timeline interactions, one JSON object per line.
//!
//! ```text
//! {"op": "stream", "event": {"event": "update", "payload": {"id": "9"}}}
//! {"op": "heading", "value": false}
//! {"op": "merge"}
//! {"op": "load_older"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::broadcast;
use tootline_client::{StreamEvent, Timeline, spawn_stream};

/// Capacity of the replay channel; a batch larger than this lags the pump.
const STREAM_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Push one event through the stream pump.
    Stream { event: StreamEvent },
    /// Scroll to the top (`true`) or away from it (`false`).
    Heading { value: bool },
    Merge,
    Archive,
    /// Page in statuses older than the oldest visible one.
    LoadOlder,
    Filter { text: String },
    Clear,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("script line {}", n + 1))
        })
        .collect()
}

/// Run `steps` against `timeline` in order.
///
/// Consecutive stream steps are sent as one batch through a fresh pump, which
/// is drained before the next non-stream step runs.
pub async fn run(timeline: &Timeline, steps: Vec<Step>) -> Result<()> {
    let mut batch = Vec::new();
    for step in steps {
        match step {
            Step::Stream { event } => {
                batch.push(event);
                continue;
            }
            other => {
                flush(timeline, std::mem::take(&mut batch)).await?;
                run_step(timeline, other).await;
            }
        }
    }
    flush(timeline, batch).await
}

async fn flush(timeline: &Timeline, events: Vec<StreamEvent>) -> Result<()> {
    if events.is_empty() {
        return Ok(());
    }
    let (tx, rx) = broadcast::channel(STREAM_CHANNEL_CAPACITY);
    let pump = spawn_stream(timeline.clone(), rx);
    for event in events {
        tx.send(event).context("stream pump exited early")?;
    }
    drop(tx);
    pump.await.context("stream pump panicked")
}

async fn run_step(timeline: &Timeline, step: Step) {
    match step {
        Step::Stream { .. } => unreachable!("stream steps are batched by run"),
        Step::Heading { value } => timeline.toggle_heading(value),
        Step::Merge => {
            let merged = timeline.merge_pending();
            tracing::info!(merged, "Merged pending statuses");
        }
        Step::Archive => timeline.archive(),
        Step::LoadOlder => match timeline.lazy_load_more().await {
            Ok(Some(page)) => tracing::info!(count = page.len(), "Loaded older statuses"),
            Ok(None) => tracing::info!("No older page loaded"),
            // The timeline already warned; a later step may retry.
            Err(e) => tracing::debug!(error = %e, "Skipping failed load_older step"),
        },
        Step::Filter { text } => timeline.set_filter(text),
        Step::Clear => timeline.clear(),
    }
}
