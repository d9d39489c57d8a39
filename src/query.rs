//! Query state and result set types for the list controller.
//!
//! `QueryState` is the full set of parameters determining which page of
//! which filtered subset is shown. It is created with defaults when a view
//! mounts, mutated by user interaction, and discarded on unmount.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::FilterValue;

/// Strategy governing where filtering and paging happen.
///
/// Fixed per list instance; small collections can afford the bulk fetch
/// of `ClientCached`, large ones stay `ServerPaged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    /// Every query change issues a remote request carrying page/filter
    /// parameters; the server owns filtering and the total count.
    #[default]
    ServerPaged,
    /// One bulk fetch populates a local cache; search, filters, and paging
    /// recompute locally until the cache is invalidated.
    ClientCached,
}

/// The parameters determining what subset/page of records is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search_text: String,
    /// Active filters by name. Presence in the map is what makes a filter
    /// active — `Flag(false)` here is an active filter, not "no filter".
    pub filters: BTreeMap<String, FilterValue>,
    /// 1-based page index, always clamped to the current population.
    pub page: u32,
    pub page_size: u32,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            search_text: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// True when neither search text nor any filter is active, i.e. the
    /// predicate over records is "always true".
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.trim().is_empty() && self.filters.is_empty()
    }

    /// Apply a partial update. Any change to search or filters resets the
    /// page to 1; paging fields are taken as-is (clamping happens against
    /// the population at recompute time).
    pub fn apply(&mut self, patch: QueryPatch) {
        if let Some(text) = patch.search_text {
            self.search_text = text;
            self.page = 1;
        }
        for (name, value) in patch.set_filters {
            self.filters.insert(name, value);
            self.page = 1;
        }
        for name in patch.clear_filters {
            self.filters.remove(&name);
            self.page = 1;
        }
        if let Some(page) = patch.page {
            self.page = page.max(1);
        }
        if let Some(size) = patch.page_size {
            self.page_size = size.max(1);
        }
    }
}

/// A partial query update, the single entry point for user-driven query
/// mutations coming from the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct QueryPatch {
    pub search_text: Option<String>,
    pub set_filters: Vec<(String, FilterValue)>,
    pub clear_filters: Vec<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl QueryPatch {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn filter(name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            set_filters: vec![(name.into(), value.into())],
            ..Default::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    /// True when the patch only changes search text, which is the one
    /// mutation that goes through the debounce window.
    pub fn is_search_only(&self) -> bool {
        self.search_text.is_some()
            && self.set_filters.is_empty()
            && self.clear_filters.is_empty()
            && self.page.is_none()
            && self.page_size.is_none()
    }
}

/// The materialized page for the current query: one page of records plus
/// the size of the full filtered population.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<R> {
    pub items: Vec<R>,
    /// Size of the entire filtered population, not just this page.
    pub total_count: u64,
}

impl<R> Default for ResultSet<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

impl<R> ResultSet<R> {
    /// Number of pages the population spans at the given page size.
    /// An empty population still has one (empty) page.
    pub fn page_count(&self, page_size: u32) -> u32 {
        let size = u64::from(page_size.max(1));
        (self.total_count.div_ceil(size)).max(1) as u32
    }
}

/// Clamp a 1-based page index so it addresses a nonempty slice of a
/// population of `total_count`, falling back to page 1 when empty.
pub fn clamp_page(page: u32, page_size: u32, total_count: u64) -> u32 {
    let size = u64::from(page_size.max(1));
    let last = (total_count.div_ceil(size)).max(1) as u32;
    page.clamp(1, last)
}
