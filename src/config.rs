//! Per-list configuration.
//!
//! One `ListConfig` per controller instance. Serializable so a console can
//! keep its per-screen tuning in a config file rather than in code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::query::FetchMode;

/// Configuration for one list controller instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Where filtering and paging happen. See [`FetchMode`].
    #[serde(default)]
    pub fetch_mode: FetchMode,

    /// Debounce window for search-text changes, in milliseconds
    /// (default: 300). Only the most recent change inside the window
    /// triggers a recompute.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Page size a freshly mounted view starts with (default: 10).
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Ceiling on the bulk fetch that fills the client-side cache
    /// (default: 1000). Populations beyond this are truncated by the
    /// backend; collections that can grow past it belong in
    /// `ServerPaged` mode.
    #[serde(default = "default_cache_ceiling")]
    pub cache_ceiling: u32,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> u32 {
    10
}

fn default_cache_ceiling() -> u32 {
    1000
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            fetch_mode: FetchMode::default(),
            debounce_ms: default_debounce_ms(),
            default_page_size: default_page_size(),
            cache_ceiling: default_cache_ceiling(),
        }
    }
}

impl ListConfig {
    pub fn new(fetch_mode: FetchMode) -> Self {
        Self {
            fetch_mode,
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
