//! Where statuses come from.
//!
//! [`TimelineSource`] is the narrow seam to the remote API: two paged reads,
//! both newest-first. The HTTP client behind it (auth, retries, proxies) is
//! somebody else's problem.
//!
//! [`MemorySource`] serves a fixed newest-first list and is what the CLI and
//! the tests run against.

use async_trait::async_trait;
use parking_lot::Mutex;
use tootline_types::{StatusEntry, StatusId};

use crate::error::FetchError;

/// Paged access to one remote timeline.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// The newest `limit` statuses, newest-first.
    async fn fetch_latest(&self, limit: usize) -> Result<Vec<StatusEntry>, FetchError>;

    /// Up to `limit` statuses strictly older than `max_id`, newest-first.
    async fn fetch_older(
        &self,
        max_id: &StatusId,
        limit: usize,
    ) -> Result<Vec<StatusEntry>, FetchError>;
}

/// In-memory source over a newest-first status list.
#[derive(Debug, Default)]
pub struct MemorySource {
    statuses: Vec<StatusEntry>,
    /// When set, every fetch fails with this error.
    failure: Mutex<Option<FetchError>>,
}

impl MemorySource {
    pub fn new(statuses: Vec<StatusEntry>) -> Self {
        Self { statuses, failure: Mutex::new(None) }
    }

    /// Parse a JSON array of statuses (newest-first), as returned by the
    /// timeline endpoints.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Make subsequent fetches fail (`Some`) or succeed again (`None`).
    pub fn set_failure(&self, failure: Option<FetchError>) {
        *self.failure.lock() = failure;
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    fn check_failure(&self) -> Result<(), FetchError> {
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TimelineSource for MemorySource {
    async fn fetch_latest(&self, limit: usize) -> Result<Vec<StatusEntry>, FetchError> {
        self.check_failure()?;
        Ok(self.statuses.iter().take(limit).cloned().collect())
    }

    async fn fetch_older(
        &self,
        max_id: &StatusId,
        limit: usize,
    ) -> Result<Vec<StatusEntry>, FetchError> {
        self.check_failure()?;
        // An unknown cursor yields nothing rather than guessing a position.
        let Some(pos) = self.statuses.iter().position(|s| &s.id == max_id) else {
            return Ok(Vec::new());
        };
        Ok(self.statuses[pos + 1..].iter().take(limit).cloned().collect())
    }
}
