//! Live timeline buffer for tootline clients.
//!
//! Keeps one timeline view's statuses: the page fetched on open, real-time
//! arrivals (shown at once or held back while the user is scrolled away),
//! older pages loaded on demand, and in-place edits and deletions pushed by
//! the server.
//!
//! - [`TimelineBuffer`]: the synchronous state machine. No I/O.
//! - [`Timeline`]: shareable async wrapper that pages through a
//!   [`TimelineSource`] with at most one lazy-load in flight.
//! - [`spawn_stream`]: feeds [`StreamEvent`]s from a broadcast channel into a
//!   [`Timeline`].

pub mod buffer;
pub mod config;
pub mod constants;
pub mod error;
pub mod source;
pub mod stream;
pub mod timeline;

pub use buffer::{Ingest, LazyLoadTicket, TimelineBuffer, TimelineSnapshot};
pub use config::{DisplayPrefs, TimelineConfig};
pub use error::{ConfigError, FetchError, TimelineError};
pub use source::{MemorySource, TimelineSource};
pub use stream::{Applied, StreamEvent, pump_stream, spawn_stream};
pub use timeline::Timeline;
pub use tootline_types::{Account, StatusEntry, StatusId};
