//! Timeline sizing constants.
//!
//! Defaults for [`TimelineConfig`](crate::TimelineConfig); the buffer reads
//! the configured values, not these directly.

/// Statuses requested per page, both for the initial fetch and for each
/// lazy-load of older statuses.
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// Most pending statuses moved into view by one merge. Anything older in the
/// pending queue is dropped rather than kept for a later merge.
pub const DEFAULT_MERGE_LIMIT: usize = 80;

/// Visible statuses kept by an archive pass.
pub const DEFAULT_ARCHIVE_LIMIT: usize = 40;

/// Directory under the platform config dir holding tootline settings.
pub const CONFIG_DIR_NAME: &str = "tootline";

/// Timeline settings file name.
pub const CONFIG_FILE_NAME: &str = "timeline.ron";
