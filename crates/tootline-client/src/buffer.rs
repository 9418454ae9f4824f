//! Timeline buffer state machine.
//!
//! Owns the two newest-first sequences behind a timeline view and every rule
//! for moving statuses between them, independent of any UI framework or
//! network client so the logic is unit-testable on its own.
//!
//! # Sequences
//!
//! - `visible`: what the view renders.
//! - `pending`: real-time arrivals held back while the user is scrolled away
//!   from the top (`heading == false`), waiting for [`TimelineBuffer::merge_pending`].
//!
//! No status id appears twice across the two. A membership index of known ids
//! backs the duplicate check on the real-time path; inserting paths add to it
//! and removing paths rebuild it from both sequences.
//!
//! # Pagination
//!
//! ```text
//!            begin_lazy_load()                 append_older() + end_lazy_load()
//!   idle ───────────────────────▶ loading ───────────────────────────────▶ idle
//!                                  │   ▲
//!          clear() / load_initial()│   │ begin_lazy_load() → None
//!          (generation bumped)     └───┘ append_older() with the old ticket
//!                                        discards the page
//! ```
//!
//! The flag stays set until the outstanding fetch settles, even across a
//! `clear()` or `load_initial()`, so at most one page request is ever in
//! flight. The fetch itself happens outside the buffer (see
//! [`Timeline`](crate::Timeline)); the buffer only hands out and honours
//! [`LazyLoadTicket`]s.

use std::collections::HashSet;

use tootline_types::{StatusEntry, StatusId};
use tracing::{debug, trace};

use crate::config::TimelineConfig;
use crate::constants::{DEFAULT_ARCHIVE_LIMIT, DEFAULT_MERGE_LIMIT};

/// Where a real-time status ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Ingest {
    /// Prepended to the visible sequence (view is at the top).
    Visible,
    /// Prepended to the pending sequence (view is scrolled away).
    Pending,
    /// Already known; nothing changed.
    Duplicate,
}

/// Proof that a lazy-load was started against a particular buffer generation.
///
/// Completions carrying a ticket from before the last [`TimelineBuffer::clear`]
/// or [`TimelineBuffer::load_initial`] are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyLoadTicket {
    generation: u64,
    max_id: StatusId,
}

impl LazyLoadTicket {
    /// Cursor to page from: fetch statuses older than this id.
    pub fn max_id(&self) -> &StatusId {
        &self.max_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Point-in-time copy of a buffer's observable state, for renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineSnapshot {
    pub visible: Vec<StatusEntry>,
    pub pending: Vec<StatusEntry>,
    pub heading: bool,
    pub lazy_loading: bool,
    pub filter: String,
}

impl TimelineSnapshot {
    /// Visible statuses that pass the current filter.
    pub fn filtered(&self) -> impl Iterator<Item = &StatusEntry> {
        self.visible.iter().filter(|s| s.matches_filter(&self.filter))
    }
}

/// Live buffer for one timeline view.
#[derive(Debug, Clone)]
pub struct TimelineBuffer {
    visible: Vec<StatusEntry>,
    pending: Vec<StatusEntry>,
    /// View is at the top: arrivals go straight to `visible`.
    heading: bool,
    /// A lazy-load is outstanding.
    lazy_loading: bool,
    filter: String,
    /// Ids present in `visible` or `pending`.
    known: HashSet<StatusId>,
    /// Bumped whenever the contents are reset; stamps lazy-load tickets.
    generation: u64,
    merge_limit: usize,
    archive_limit: usize,
}

impl Default for TimelineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineBuffer {
    /// Empty buffer with the default merge and archive limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MERGE_LIMIT, DEFAULT_ARCHIVE_LIMIT)
    }

    pub fn with_limits(merge_limit: usize, archive_limit: usize) -> Self {
        Self {
            visible: Vec::new(),
            pending: Vec::new(),
            heading: true,
            lazy_loading: false,
            filter: String::new(),
            known: HashSet::new(),
            generation: 0,
            merge_limit,
            archive_limit,
        }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::with_limits(config.merge_limit, config.archive_limit)
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn visible(&self) -> &[StatusEntry] {
        &self.visible
    }

    pub fn pending(&self) -> &[StatusEntry] {
        &self.pending
    }

    pub fn heading(&self) -> bool {
        self.heading
    }

    pub fn is_lazy_loading(&self) -> bool {
        self.lazy_loading
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether `id` is in either sequence.
    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Oldest visible status, the natural cursor for the next lazy-load.
    pub fn oldest(&self) -> Option<&StatusEntry> {
        self.visible.last()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            visible: self.visible.clone(),
            pending: self.pending.clone(),
            heading: self.heading,
            lazy_loading: self.lazy_loading,
            filter: self.filter.clone(),
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// Record whether the view is at the top. Moves nothing; call
    /// [`merge_pending`](Self::merge_pending) to reveal held-back statuses.
    pub fn toggle_heading(&mut self, value: bool) {
        self.heading = value;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Replace the visible sequence with a freshly fetched page.
    ///
    /// Any lazy-load in flight was paging from the old contents, so its page
    /// will be discarded. The flag stays held until that fetch settles.
    pub fn load_initial(&mut self, page: Vec<StatusEntry>) {
        debug!(count = page.len(), "Loading initial timeline page");
        self.visible = page;
        self.generation += 1;
        self.reindex();
    }

    /// Accept one status from the real-time stream.
    pub fn ingest_realtime(&mut self, entry: StatusEntry) -> Ingest {
        if self.known.contains(&entry.id) {
            trace!(id = %entry.id, "Ignoring duplicate status");
            return Ingest::Duplicate;
        }
        self.known.insert(entry.id.clone());
        if self.heading {
            self.visible.insert(0, entry);
            Ingest::Visible
        } else {
            self.pending.insert(0, entry);
            Ingest::Pending
        }
    }

    /// Move held-back statuses into view.
    ///
    /// At most `merge_limit` of the newest pending statuses are prepended as a
    /// block; older ones are dropped for good. Pending is always left empty.
    /// Returns how many were merged.
    pub fn merge_pending(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let mut merged = std::mem::take(&mut self.pending);
        let dropped = merged.len().saturating_sub(self.merge_limit);
        merged.truncate(self.merge_limit);
        let count = merged.len();

        merged.append(&mut self.visible);
        self.visible = merged;

        if dropped > 0 {
            debug!(merged = count, dropped, "Merged pending statuses, dropped overflow");
            self.reindex();
        } else {
            debug!(merged = count, "Merged pending statuses");
        }
        count
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Start a lazy-load of statuses older than `cursor`.
    ///
    /// Returns `None` if one is already outstanding.
    pub fn begin_lazy_load(&mut self, cursor: &StatusEntry) -> Option<LazyLoadTicket> {
        if self.lazy_loading {
            trace!(cursor = %cursor.id, "Lazy-load already in flight");
            return None;
        }
        self.lazy_loading = true;
        Some(LazyLoadTicket { generation: self.generation, max_id: cursor.id.clone() })
    }

    /// Whether a completion carrying `ticket` should still be applied.
    pub fn is_current(&self, ticket: &LazyLoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Append an older page to the end of `visible`.
    ///
    /// The server only returns statuses older than the cursor, so the page is
    /// not checked against what is already visible. Returns `false` (and
    /// leaves the buffer alone) if the ticket is stale.
    pub fn append_older(&mut self, ticket: &LazyLoadTicket, page: &[StatusEntry]) -> bool {
        if !self.is_current(ticket) {
            debug!(
                cursor = %ticket.max_id,
                ticket_generation = ticket.generation,
                generation = self.generation,
                "Discarding stale lazy-load page"
            );
            return false;
        }
        debug!(cursor = %ticket.max_id, count = page.len(), "Appending older statuses");
        self.known.extend(page.iter().map(|s| s.id.clone()));
        self.visible.extend_from_slice(page);
        true
    }

    /// Release the lazy-load flag once the fetch behind `ticket` has settled,
    /// success or not.
    ///
    /// Stale tickets release it too: while the flag is held no other ticket
    /// can be issued, so the holder is always the one settling.
    pub fn end_lazy_load(&mut self, ticket: &LazyLoadTicket) {
        if !self.is_current(ticket) {
            trace!(cursor = %ticket.max_id, "Stale lazy-load settled");
        }
        self.lazy_loading = false;
    }

    // =========================================================================
    // Mutation & removal
    // =========================================================================

    /// Apply a refreshed copy of a status to whatever visible entries show it.
    ///
    /// An entry with the same id is replaced outright. A reblog wrapping it
    /// keeps its own id and wrapper fields; only the embedded original is
    /// swapped. Pending entries are left as they arrived. Returns the number
    /// of entries touched.
    pub fn update_entry(&mut self, updated: &StatusEntry) -> usize {
        let mut touched = 0;
        for entry in &mut self.visible {
            if entry.id == updated.id {
                *entry = updated.clone();
                touched += 1;
            } else if entry.reblog_id() == Some(&updated.id) {
                entry.reblog = Some(Box::new(updated.clone()));
                touched += 1;
            }
        }
        trace!(id = %updated.id, touched, "Updated status");
        touched
    }

    /// Remove a status and every visible reblog of it. Pending is untouched.
    /// Returns the number of entries removed.
    pub fn delete_entry(&mut self, id: &str) -> usize {
        let before = self.visible.len();
        self.visible.retain(|entry| !entry.refers_to(id));
        let removed = before - self.visible.len();
        if removed > 0 {
            debug!(id, removed, "Deleted status");
            self.reindex();
        }
        removed
    }

    // =========================================================================
    // Eviction
    // =========================================================================

    /// Keep only the newest `archive_limit` visible statuses.
    pub fn archive(&mut self) {
        if self.visible.len() <= self.archive_limit {
            return;
        }
        debug!(from = self.visible.len(), to = self.archive_limit, "Archiving timeline");
        self.visible.truncate(self.archive_limit);
        self.reindex();
    }

    /// Drop both sequences. An outstanding lazy-load keeps the flag until its
    /// fetch settles, but its page will be discarded.
    pub fn clear(&mut self) {
        self.visible.clear();
        self.pending.clear();
        self.known.clear();
        self.generation += 1;
    }

    fn reindex(&mut self) {
        self.known.clear();
        self.known
            .extend(self.visible.iter().chain(self.pending.iter()).map(|s| s.id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str) -> StatusEntry {
        StatusEntry::new(id, "alice", format!("status {id}"))
    }

    /// Newest-first statuses with ids `prefix{n-1}` .. `prefix0`.
    fn statuses(prefix: &str, n: usize) -> Vec<StatusEntry> {
        (0..n).rev().map(|i| status(&format!("{prefix}{i}"))).collect()
    }

    fn ids(entries: &[StatusEntry]) -> Vec<&str> {
        entries.iter().map(|s| s.id.as_str()).collect()
    }

    // =========================================================================
    // Ingest
    // =========================================================================

    #[test]
    fn test_defaults() {
        let buf = TimelineBuffer::new();
        assert!(buf.visible().is_empty());
        assert!(buf.pending().is_empty());
        assert!(buf.heading());
        assert!(!buf.is_lazy_loading());
        assert_eq!(buf.filter(), "");
    }

    #[test]
    fn test_heading_routes_to_visible() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);

        assert_eq!(buf.ingest_realtime(status("2")), Ingest::Visible);
        assert_eq!(ids(buf.visible()), vec!["2", "1"]);
        assert!(buf.pending().is_empty());
    }

    #[test]
    fn test_scrolled_away_routes_to_pending() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);
        buf.toggle_heading(false);

        assert_eq!(buf.ingest_realtime(status("2")), Ingest::Pending);
        assert_eq!(buf.ingest_realtime(status("3")), Ingest::Pending);
        assert_eq!(ids(buf.visible()), vec!["1"]);
        assert_eq!(ids(buf.pending()), vec!["3", "2"]);
    }

    #[test]
    fn test_duplicate_ingest_is_noop() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("2"), status("1")]);
        buf.toggle_heading(false);
        buf.ingest_realtime(status("3"));
        let before = buf.snapshot();

        // Already visible.
        assert_eq!(buf.ingest_realtime(status("1")), Ingest::Duplicate);
        // Already pending, even once heading flips back.
        buf.toggle_heading(true);
        assert_eq!(buf.ingest_realtime(status("3")), Ingest::Duplicate);

        let after = buf.snapshot();
        assert_eq!(after.visible, before.visible);
        assert_eq!(after.pending, before.pending);
    }

    #[test]
    fn test_toggle_heading_moves_nothing() {
        let mut buf = TimelineBuffer::new();
        buf.toggle_heading(false);
        buf.ingest_realtime(status("1"));
        buf.toggle_heading(true);
        assert!(buf.visible().is_empty());
        assert_eq!(ids(buf.pending()), vec!["1"]);
    }

    // =========================================================================
    // Merge
    // =========================================================================

    #[test]
    fn test_merge_prepends_block() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);
        buf.toggle_heading(false);
        buf.ingest_realtime(status("2"));
        buf.ingest_realtime(status("3"));

        assert_eq!(buf.merge_pending(), 2);
        assert_eq!(ids(buf.visible()), vec!["3", "2", "1"]);
        assert!(buf.pending().is_empty());
    }

    #[test]
    fn test_merge_caps_at_limit() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(statuses("v", 5));
        buf.toggle_heading(false);
        for entry in statuses("p", 100).into_iter().rev() {
            buf.ingest_realtime(entry);
        }
        assert_eq!(buf.pending().len(), 100);
        assert_eq!(buf.pending()[0].id, "p99");

        assert_eq!(buf.merge_pending(), 80);
        assert_eq!(buf.visible().len(), 85);
        assert!(buf.pending().is_empty());
        assert_eq!(buf.visible()[0].id, "p99");
        assert_eq!(buf.visible()[79].id, "p20");
        assert_eq!(buf.visible()[80].id, "v4");

        // Dropped overflow is forgotten, so it may arrive again.
        assert!(!buf.contains("p19"));
        buf.toggle_heading(true);
        assert_eq!(buf.ingest_realtime(status("p19")), Ingest::Visible);
    }

    #[test]
    fn test_merge_empty_pending() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);
        assert_eq!(buf.merge_pending(), 0);
        assert_eq!(ids(buf.visible()), vec!["1"]);
    }

    // =========================================================================
    // Archive & clear
    // =========================================================================

    #[test]
    fn test_archive_keeps_newest() {
        let mut buf = TimelineBuffer::new();
        let page = statuses("s", 100);
        buf.load_initial(page.clone());
        buf.toggle_heading(false);
        buf.ingest_realtime(status("new"));

        buf.archive();
        assert_eq!(buf.visible(), &page[..40]);
        assert_eq!(ids(buf.pending()), vec!["new"]);

        // Evicted ids are no longer known.
        assert!(!buf.contains("s0"));
        assert!(buf.contains("s60"));
    }

    #[test]
    fn test_archive_short_timeline_untouched() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(statuses("s", 10));
        buf.archive();
        assert_eq!(buf.visible().len(), 10);
    }

    #[test]
    fn test_custom_limits() {
        let config = TimelineConfig { merge_limit: 2, archive_limit: 3, ..Default::default() };
        let mut buf = TimelineBuffer::from_config(&config);
        buf.load_initial(statuses("s", 5));
        buf.archive();
        assert_eq!(ids(buf.visible()), vec!["s4", "s3", "s2"]);

        buf.toggle_heading(false);
        for entry in statuses("p", 4).into_iter().rev() {
            buf.ingest_realtime(entry);
        }
        assert_eq!(buf.merge_pending(), 2);
        assert_eq!(ids(&buf.visible()[..2]), vec!["p3", "p2"]);
    }

    #[test]
    fn test_clear() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);
        buf.toggle_heading(false);
        buf.ingest_realtime(status("2"));
        buf.set_filter("rust");

        buf.clear();
        assert!(buf.visible().is_empty());
        assert!(buf.pending().is_empty());
        assert!(!buf.contains("1"));
        // Flags survive.
        assert!(!buf.heading());
        assert_eq!(buf.filter(), "rust");
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    #[test]
    fn test_lazy_load_single_flight() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("5")]);
        let cursor = buf.oldest().cloned().unwrap();

        let ticket = buf.begin_lazy_load(&cursor).expect("first load starts");
        assert_eq!(ticket.max_id(), "5");
        assert!(buf.is_lazy_loading());
        assert!(buf.begin_lazy_load(&cursor).is_none());

        assert!(buf.append_older(&ticket, &[status("4"), status("3")]));
        buf.end_lazy_load(&ticket);
        assert!(!buf.is_lazy_loading());
        assert_eq!(ids(buf.visible()), vec!["5", "4", "3"]);
        assert!(buf.contains("3"));
    }

    #[test]
    fn test_lazy_load_failure_releases() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("5")]);
        let ticket = buf.begin_lazy_load(&status("5")).unwrap();

        buf.end_lazy_load(&ticket);
        assert!(!buf.is_lazy_loading());
        assert!(buf.begin_lazy_load(&status("5")).is_some());
    }

    #[test]
    fn test_append_lands_after_concurrent_ingest() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("5")]);
        let ticket = buf.begin_lazy_load(&status("5")).unwrap();

        // Stream keeps flowing while the page is in flight.
        buf.ingest_realtime(status("6"));
        buf.append_older(&ticket, &[status("4")]);
        buf.end_lazy_load(&ticket);

        assert_eq!(ids(buf.visible()), vec!["6", "5", "4"]);
    }

    #[test]
    fn test_clear_keeps_outstanding_load_single_flight() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("5")]);
        let stale = buf.begin_lazy_load(&status("5")).unwrap();

        buf.clear();
        assert!(buf.is_lazy_loading());
        assert!(buf.begin_lazy_load(&status("5")).is_none());

        // Reopening does not free the slot either.
        buf.load_initial(vec![status("9")]);
        assert!(buf.begin_lazy_load(&status("9")).is_none());

        // The old fetch settles: its page is dropped, the flag released.
        assert!(!buf.append_older(&stale, &[status("4")]));
        buf.end_lazy_load(&stale);
        assert_eq!(ids(buf.visible()), vec!["9"]);
        assert!(!buf.is_lazy_loading());

        let fresh = buf.begin_lazy_load(&status("9")).expect("slot free again");
        assert!(buf.is_current(&fresh));
    }

    #[test]
    fn test_reload_discards_outstanding_page() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("5")]);
        let stale = buf.begin_lazy_load(&status("5")).unwrap();

        buf.load_initial(vec![status("8"), status("7")]);
        assert!(buf.is_lazy_loading());
        assert!(!buf.is_current(&stale));
        assert!(!buf.append_older(&stale, &[status("4")]));
        assert!(!buf.contains("4"));
        buf.end_lazy_load(&stale);

        assert_eq!(ids(buf.visible()), vec!["8", "7"]);
        assert!(buf.begin_lazy_load(&status("7")).is_some());
    }

    // =========================================================================
    // Update & delete
    // =========================================================================

    #[test]
    fn test_update_replaces_by_id() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("2"), status("1")]);

        let mut updated = status("1");
        updated.favourites_count = 3;
        assert_eq!(buf.update_entry(&updated), 1);
        assert_eq!(buf.visible()[1], updated);
        assert_eq!(buf.visible()[0], status("2"));
    }

    #[test]
    fn test_update_reaches_into_reblog() {
        let original = status("1");
        let reblog = StatusEntry::reblog_of("2", "bob", original.clone());
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![original, reblog.clone()]);

        let mut updated = status("1");
        updated.content = "x".into();
        updated.favourited = true;
        assert_eq!(buf.update_entry(&updated), 2);

        assert_eq!(buf.visible()[0], updated);
        let wrapper = &buf.visible()[1];
        assert_eq!(wrapper.id, "2");
        assert_eq!(wrapper.account, reblog.account);
        assert_eq!(wrapper.reblog.as_deref(), Some(&updated));
    }

    #[test]
    fn test_update_skips_pending_and_absent() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);
        buf.toggle_heading(false);
        buf.ingest_realtime(status("2"));

        let mut updated = status("2");
        updated.content = "changed".into();
        assert_eq!(buf.update_entry(&updated), 0);
        assert_eq!(buf.pending()[0], status("2"));

        assert_eq!(buf.update_entry(&status("404")), 0);
        assert_eq!(buf.visible(), &[status("1")]);
    }

    #[test]
    fn test_delete_cascades_to_reblogs() {
        let original = status("1");
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![
            original.clone(),
            StatusEntry::reblog_of("2", "bob", original),
            status("3"),
        ]);

        assert_eq!(buf.delete_entry("1"), 2);
        assert_eq!(ids(buf.visible()), vec!["3"]);
        assert!(!buf.contains("2"));
    }

    #[test]
    fn test_delete_reblog_keeps_original() {
        let original = status("1");
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![StatusEntry::reblog_of("2", "bob", original.clone()), original]);

        assert_eq!(buf.delete_entry("2"), 1);
        assert_eq!(ids(buf.visible()), vec!["1"]);
    }

    #[test]
    fn test_delete_leaves_pending_and_ignores_absent() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("1")]);
        buf.toggle_heading(false);
        buf.ingest_realtime(status("2"));

        assert_eq!(buf.delete_entry("2"), 0);
        assert_eq!(ids(buf.pending()), vec!["2"]);
        assert_eq!(buf.delete_entry("404"), 0);
        assert_eq!(ids(buf.visible()), vec!["1"]);
    }

    // =========================================================================
    // Scenario
    // =========================================================================

    #[test]
    fn test_open_push_scroll_merge() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![status("s5"), status("s4"), status("s3")]);
        assert_eq!(ids(buf.visible()), vec!["s5", "s4", "s3"]);

        buf.ingest_realtime(status("s6"));
        assert_eq!(ids(buf.visible()), vec!["s6", "s5", "s4", "s3"]);

        buf.toggle_heading(false);
        buf.ingest_realtime(status("s7"));
        assert_eq!(ids(buf.pending()), vec!["s7"]);
        assert_eq!(ids(buf.visible()), vec!["s6", "s5", "s4", "s3"]);

        buf.toggle_heading(true);
        buf.merge_pending();
        assert_eq!(ids(buf.visible()), vec!["s7", "s6", "s5", "s4", "s3"]);
        assert!(buf.pending().is_empty());
    }

    #[test]
    fn test_snapshot_filtered() {
        let mut buf = TimelineBuffer::new();
        buf.load_initial(vec![
            StatusEntry::new("2", "bob", "lunch"),
            StatusEntry::new("1", "alice", "Rust release"),
        ]);
        buf.set_filter("rust");

        let snap = buf.snapshot();
        assert_eq!(snap.visible.len(), 2);
        let shown: Vec<_> = snap.filtered().map(|s| s.id.as_str()).collect();
        assert_eq!(shown, vec!["1"]);
    }
}
