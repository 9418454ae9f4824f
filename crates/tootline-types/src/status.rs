//! Timeline status records.
//!
//! A [`StatusEntry`] carries the handful of fields the timeline buffer and
//! renderer look at. Everything else the server sends is kept verbatim in
//! `extra` so records round-trip without loss.
//!
//! ## Reblogs
//!
//! A reblog is a status of its own (own id, own author) that embeds the
//! original status in `reblog`. Only one level is modeled: the embedded
//! original never carries a reblog of its own on the wire, and nothing here
//! walks deeper than one hop.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::StatusId;

/// Author of a status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: String,
    /// `user` for local accounts, `user@host` for remote ones.
    #[serde(default)]
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    pub fn new(acct: impl Into<String>) -> Self {
        let acct = acct.into();
        Self {
            id: acct.clone(),
            display_name: acct.clone(),
            acct,
            extra: Map::new(),
        }
    }
}

/// One timeline item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub id: StatusId,
    #[serde(default)]
    pub account: Account,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    /// Content warning text; empty when the status has none.
    #[serde(default)]
    pub spoiler_text: String,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub favourites_count: u64,
    #[serde(default)]
    pub reblogs_count: u64,
    #[serde(default)]
    pub favourited: bool,
    #[serde(default)]
    pub reblogged: bool,
    #[serde(default)]
    pub media_attachments: Vec<Value>,
    /// The original status when this entry is a reblog.
    #[serde(default)]
    pub reblog: Option<Box<StatusEntry>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusEntry {
    /// A plain status with the given id, author handle and content.
    pub fn new(id: impl Into<StatusId>, acct: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            account: Account::new(acct),
            content: content.into(),
            created_at: String::new(),
            spoiler_text: String::new(),
            sensitive: false,
            favourites_count: 0,
            reblogs_count: 0,
            favourited: false,
            reblogged: false,
            media_attachments: Vec::new(),
            reblog: None,
            extra: Map::new(),
        }
    }

    /// A reblog by `acct` wrapping `original`.
    pub fn reblog_of(id: impl Into<StatusId>, acct: impl Into<String>, original: StatusEntry) -> Self {
        let mut status = Self::new(id, acct, "");
        status.reblog = Some(Box::new(original));
        status
    }

    /// Id of the embedded original, if this entry is a reblog.
    pub fn reblog_id(&self) -> Option<&StatusId> {
        self.reblog.as_deref().map(|r| &r.id)
    }

    /// True if this entry is `id` itself or a reblog wrapping `id`.
    pub fn refers_to(&self, id: &str) -> bool {
        self.id == id || self.reblog_id().is_some_and(|r| r == id)
    }

    /// The status whose content is displayed: the original for reblogs.
    pub fn displayed(&self) -> &StatusEntry {
        self.reblog.as_deref().unwrap_or(self)
    }

    /// Case-insensitive substring match against the displayed content,
    /// spoiler text and author handle. An empty filter matches everything.
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let shown = self.displayed();
        [
            shown.content.as_str(),
            shown.spoiler_text.as_str(),
            shown.account.acct.as_str(),
            self.account.acct.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
