//! Shared, async-facing timeline.
//!
//! [`Timeline`] pairs a [`TimelineBuffer`] with the [`TimelineSource`] it
//! pages from. It is `Clone + Send + Sync`: the view, the stream pump and any
//! background refresh can all hold one.
//!
//! ```text
//!   view / stream pump / refresh           Arc<Mutex<TimelineBuffer>>
//!   ┌───────────────────────────┐  lock   ┌───────────────────────────┐
//!   │ .ingest() .merge_pending()│ ──────▶ │ one critical section per  │
//!   │ .lazy_load_older()        │         │ buffer operation          │
//!   └───────────────────────────┘         └───────────────────────────┘
//!                │ fetch (no lock held)
//!                ▼
//!          dyn TimelineSource
//! ```
//!
//! The buffer lock is never held across an `.await`. A lazy-load takes the
//! lock to claim a ticket, releases it for the fetch, and takes it again to
//! append the page in one step.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tootline_types::StatusEntry;
use tracing::{debug, warn};

use crate::buffer::{Ingest, LazyLoadTicket, TimelineBuffer, TimelineSnapshot};
use crate::config::TimelineConfig;
use crate::error::TimelineError;
use crate::source::TimelineSource;

/// A timeline buffer bound to the source it fetches from.
#[derive(Clone)]
pub struct Timeline {
    buffer: Arc<Mutex<TimelineBuffer>>,
    source: Arc<dyn TimelineSource>,
    page_size: usize,
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("Timeline");
        // The lock is not reentrant; a caller may be formatting while holding it.
        match self.buffer.try_lock() {
            Some(buffer) => out.field("buffer", &*buffer),
            None => out.field("buffer", &format_args!("<locked>")),
        };
        out.field("page_size", &self.page_size).finish_non_exhaustive()
    }
}

/// Releases the lazy-load flag when dropped, so neither a failed fetch nor a
/// cancelled future can leave the buffer stuck in "loading".
struct LazyLoadRelease {
    buffer: Arc<Mutex<TimelineBuffer>>,
    ticket: LazyLoadTicket,
}

impl Drop for LazyLoadRelease {
    fn drop(&mut self) {
        self.buffer.lock().end_lazy_load(&self.ticket);
    }
}

impl Timeline {
    pub fn new(source: Arc<dyn TimelineSource>, config: &TimelineConfig) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(TimelineBuffer::from_config(config))),
            source,
            page_size: config.page_size,
        }
    }

    /// Lock the buffer for direct access.
    ///
    /// Don't hold the guard across an `.await`.
    pub fn lock(&self) -> MutexGuard<'_, TimelineBuffer> {
        self.buffer.lock()
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        self.buffer.lock().snapshot()
    }

    /// Fetch the newest page and make it the visible timeline.
    ///
    /// On failure the buffer is left as it was; the caller is expected to
    /// disable or hide the timeline.
    pub async fn fetch_initial(&self) -> Result<Vec<StatusEntry>, TimelineError> {
        match self.source.fetch_latest(self.page_size).await {
            Ok(page) => {
                self.buffer.lock().load_initial(page.clone());
                Ok(page)
            }
            Err(e) => {
                warn!(error = %e, "Initial timeline fetch failed");
                Err(e.into())
            }
        }
    }

    /// Fetch statuses older than `cursor` and append them to the timeline.
    ///
    /// Returns `Ok(None)` without fetching if a lazy-load is already in
    /// flight, and `Ok(None)` after fetching if the buffer was cleared or
    /// reloaded meanwhile (the page is discarded). The loading flag is held
    /// until the fetch settles, whatever happens to the buffer in between,
    /// and released on every path.
    pub async fn lazy_load_older(
        &self,
        cursor: &StatusEntry,
    ) -> Result<Option<Vec<StatusEntry>>, TimelineError> {
        let Some(ticket) = self.buffer.lock().begin_lazy_load(cursor) else {
            return Ok(None);
        };
        let release = LazyLoadRelease { buffer: Arc::clone(&self.buffer), ticket };

        let page = match self.source.fetch_older(release.ticket.max_id(), self.page_size).await {
            Ok(page) => page,
            Err(e) => {
                warn!(cursor = %cursor.id, error = %e, "Lazy-load of older statuses failed");
                return Err(e.into());
            }
        };

        let applied = self.buffer.lock().append_older(&release.ticket, &page);
        drop(release);
        Ok(applied.then_some(page))
    }

    /// Lazy-load from the oldest visible status, if there is one.
    pub async fn lazy_load_more(&self) -> Result<Option<Vec<StatusEntry>>, TimelineError> {
        let cursor = self.buffer.lock().oldest().cloned();
        match cursor {
            Some(cursor) => self.lazy_load_older(&cursor).await,
            None => {
                debug!("Nothing visible to page from");
                Ok(None)
            }
        }
    }

    // ── Buffer pass-throughs ─────────────────────────────────────────────

    pub fn toggle_heading(&self, value: bool) {
        self.buffer.lock().toggle_heading(value);
    }

    pub fn ingest(&self, entry: StatusEntry) -> Ingest {
        self.buffer.lock().ingest_realtime(entry)
    }

    pub fn merge_pending(&self) -> usize {
        self.buffer.lock().merge_pending()
    }

    pub fn archive(&self) {
        self.buffer.lock().archive();
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn update_entry(&self, updated: &StatusEntry) -> usize {
        self.buffer.lock().update_entry(updated)
    }

    pub fn delete_entry(&self, id: &str) -> usize {
        self.buffer.lock().delete_entry(id)
    }

    pub fn set_filter(&self, filter: impl Into<String>) {
        self.buffer.lock().set_filter(filter);
    }

    pub fn is_lazy_loading(&self) -> bool {
        self.buffer.lock().is_lazy_loading()
    }
}
