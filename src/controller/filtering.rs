//! Pure filtering/slicing pass over a cached population.
//!
//! Everything here is synchronous local computation: the controller takes
//! a snapshot of the query under its lock, runs this pass, and publishes
//! the outcome in one step so observers never see a filtered count paired
//! with an unfiltered page.

use std::collections::BTreeMap;

use crate::query::{QueryState, ResultSet, clamp_page};
use crate::types::{Filterable, FilterValue};

/// True when the record satisfies every active filter (AND semantics) and
/// the search predicate. An empty query matches everything.
pub fn matches<R: Filterable>(
    record: &R,
    filters: &BTreeMap<String, FilterValue>,
    search_needle: &str,
) -> bool {
    for (name, wanted) in filters {
        match record.field(name) {
            Some(actual) if actual == *wanted => {}
            _ => return false,
        }
    }

    if search_needle.is_empty() {
        return true;
    }
    record
        .search_text()
        .to_lowercase()
        .contains(search_needle)
}

/// Run the full client-side pass: filter the population in order, clamp
/// the page, slice it out. Returns the result set together with the page
/// index actually used, so the controller can write the clamp back into
/// its query state.
pub fn recompute_page<R: Filterable + Clone>(
    population: &[R],
    query: &QueryState,
) -> (ResultSet<R>, u32) {
    let needle = query.search_text.trim().to_lowercase();

    let filtered: Vec<&R> = population
        .iter()
        .filter(|r| matches(*r, &query.filters, &needle))
        .collect();

    let total_count = filtered.len() as u64;
    let page = clamp_page(query.page, query.page_size, total_count);

    let start = (page as usize - 1) * query.page_size as usize;
    let items: Vec<R> = filtered
        .iter()
        .skip(start)
        .take(query.page_size as usize)
        .map(|r| (*r).clone())
        .collect();

    (ResultSet { items, total_count }, page)
}
