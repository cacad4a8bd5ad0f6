mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_MAX_NUDGES_PER_CLIENT: usize = 100;
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Resolved nudge settings.
#[derive(Debug, Clone)]
pub struct NudgeSettings {
    /// Path of the SQLite nudge database.
    pub db_path: PathBuf,
    /// Per-client retention cap; oldest nudges are evicted beyond it.
    pub max_nudges_per_client: usize,
    /// Page limit applied when a read request doesn't specify one.
    pub default_page_limit: usize,
}

impl NudgeSettings {
    /// Resolve settings from an optional TOML file config.
    /// Missing values fall back to defaults.
    pub fn resolve(file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("nudges.db"));

        let max_nudges_per_client = file
            .max_nudges_per_client
            .unwrap_or(DEFAULT_MAX_NUDGES_PER_CLIENT);
        if max_nudges_per_client == 0 {
            bail!("max_nudges_per_client must be greater than zero");
        }

        let default_page_limit = file.default_page_limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if default_page_limit == 0 {
            bail!("default_page_limit must be greater than zero");
        }

        Ok(Self {
            db_path,
            max_nudges_per_client,
            default_page_limit,
        })
    }
}

impl Default for NudgeSettings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("nudges.db"),
            max_nudges_per_client: DEFAULT_MAX_NUDGES_PER_CLIENT,
            default_page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
