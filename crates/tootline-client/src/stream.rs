//! Real-time stream events and the pump that feeds them into a timeline.
//!
//! [`StreamEvent`] is the typed form of what a streaming connection pushes.
//! Whoever owns the connection publishes events on a
//! `tokio::sync::broadcast` channel; [`spawn_stream`] drains a receiver into
//! a [`Timeline`], one event per buffer operation, in arrival order.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tootline_types::{StatusEntry, StatusId};
use tracing::{debug, trace, warn};

use crate::buffer::Ingest;
use crate::timeline::Timeline;

/// Events pushed by the server's streaming API.
///
/// Serialized with the streaming API's event names as the tag:
/// `{"event": "update", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(tag = "event", content = "payload")]
pub enum StreamEvent {
    /// A new status arrived.
    #[serde(rename = "update")]
    #[strum(serialize = "update")]
    Update(StatusEntry),
    /// An existing status changed (edit, counts, favourite state).
    #[serde(rename = "status.update")]
    #[strum(serialize = "status.update")]
    StatusUpdate(StatusEntry),
    /// A status was deleted.
    #[serde(rename = "delete")]
    #[strum(serialize = "delete")]
    Delete(StatusId),
}

/// What applying one event did to the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Ingested(Ingest),
    Updated(usize),
    Deleted(usize),
}

impl Timeline {
    /// Apply one stream event.
    pub fn apply(&self, event: StreamEvent) -> Applied {
        trace!(event = event.as_ref(), "Applying stream event");
        match event {
            StreamEvent::Update(status) => Applied::Ingested(self.ingest(status)),
            StreamEvent::StatusUpdate(status) => Applied::Updated(self.update_entry(&status)),
            StreamEvent::Delete(id) => Applied::Deleted(self.delete_entry(id.as_str())),
        }
    }
}

/// Drain `rx` into `timeline` until the sender side closes.
///
/// A lagged receiver skips what it missed and carries on; the dropped
/// statuses will show up again on the next full fetch.
pub async fn pump_stream(timeline: Timeline, mut rx: broadcast::Receiver<StreamEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                timeline.apply(event);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Stream receiver lagged, events dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }
    debug!("Stream pump shutting down: channel closed");
}

/// Spawn [`pump_stream`] on the current tokio runtime.
pub fn spawn_stream(timeline: Timeline, rx: broadcast::Receiver<StreamEvent>) -> JoinHandle<()> {
    tokio::spawn(pump_stream(timeline, rx))
}
