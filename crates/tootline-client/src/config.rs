//! Timeline configuration.
//!
//! Loaded from a RON file, typically `~/.config/tootline/timeline.ron`.
//! Every field has a default, so a partial file (or none at all) is fine:
//!
//! ```ron
//! (
//!     page_size: 40,
//!     display: (cw: true),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ARCHIVE_LIMIT, DEFAULT_MERGE_LIMIT,
    DEFAULT_PAGE_SIZE,
};
use crate::error::ConfigError;

/// Sizing knobs for one timeline buffer plus display preferences for
/// whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Statuses requested per fetch.
    pub page_size: usize,
    /// Cap on pending statuses moved into view per merge.
    pub merge_limit: usize,
    /// Visible statuses retained by an archive pass.
    pub archive_limit: usize,
    pub display: DisplayPrefs,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            merge_limit: DEFAULT_MERGE_LIMIT,
            archive_limit: DEFAULT_ARCHIVE_LIMIT,
            display: DisplayPrefs::default(),
        }
    }
}

/// How statuses are shown. The buffer ignores these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPrefs {
    /// Expand content warnings instead of showing only the spoiler text.
    pub cw: bool,
    /// Show media on statuses marked sensitive.
    pub nsfw: bool,
    /// Hide every attachment regardless of sensitivity.
    pub hide_all_attachments: bool,
}

impl DisplayPrefs {
    /// Whether attachments of a status with the given sensitivity are shown.
    pub fn shows_attachments(&self, sensitive: bool) -> bool {
        !self.hide_all_attachments && (!sensitive || self.nsfw)
    }
}

impl TimelineConfig {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config file, falling back to defaults when it doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No timeline config, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}
