//! Listing query pipeline.
//!
//! Filters are relaxed rather than strict: each narrowing step is kept only if
//! it leaves enough records, and a thin result is padded back out from the
//! rest of the snapshot. The caller always gets a usable page of listings.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::models::{Property, SearchFilters, SortBy};

/// Tuning for the relaxed filters. `Default` holds the production values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Added to the requested max price
    pub price_tolerance: u32,
    /// Subtracted from the requested min size
    pub size_relaxation: u32,
    /// Relaxed min size never drops below this
    pub size_floor: u32,
    /// A structured filter is applied only if at least this many records survive
    pub min_accepted: usize,
    /// Results are backfilled up to this count
    pub min_results: usize,
    /// A short result always gains at least this many backfilled records
    pub min_backfill: usize,
    /// Result cap when the whole store holds fewer than `min_results`
    pub small_store_cap: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            price_tolerance: 50_000,
            size_relaxation: 20,
            size_floor: 70,
            min_accepted: 3,
            min_results: 6,
            min_backfill: 2,
            small_store_cap: 8,
        }
    }
}

/// Replace `working` with the records matching `keep`, unless fewer than
/// `min_accepted` would remain.
fn narrow<'a, F>(working: &mut Vec<&'a Property>, min_accepted: usize, filter: &str, keep: F)
where
    F: Fn(&Property) -> bool,
{
    let narrowed: Vec<&'a Property> = working.iter().copied().filter(|p| keep(*p)).collect();
    if narrowed.len() >= min_accepted {
        *working = narrowed;
    } else {
        debug!(filter, matched = narrowed.len(), "Filter too narrow, keeping wider set");
    }
}

fn matches_text(property: &Property, needle: &str) -> bool {
    property.address.to_lowercase().contains(needle)
        || property.postcode.to_lowercase().contains(needle)
        || property
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

fn compare(sort_by: SortBy, a: &Property, b: &Property) -> Ordering {
    match sort_by {
        SortBy::Profit => b.yearly_profit.unwrap_or(0).cmp(&a.yearly_profit.unwrap_or(0)),
        SortBy::Price => a.price.cmp(&b.price),
        SortBy::Size => b.size.cmp(&a.size),
        SortBy::Recent => b.created_at.cmp(&a.created_at),
    }
}

/// Run the filter, backfill and sort steps over a snapshot.
///
/// Total over any snapshot, including an empty one.
pub fn run(snapshot: &[Property], filters: &SearchFilters, policy: &FilterPolicy) -> Vec<Property> {
    let mut working: Vec<&Property> = snapshot.iter().collect();

    if let Some(max_price) = filters.max_price {
        let ceiling = u64::from(max_price) + u64::from(policy.price_tolerance);
        narrow(&mut working, policy.min_accepted, "max_price", |p| u64::from(p.price) <= ceiling);
    }

    if let Some(min_size) = filters.min_size {
        let threshold = min_size
            .saturating_sub(policy.size_relaxation)
            .max(policy.size_floor);
        narrow(&mut working, policy.min_accepted, "min_size", |p| p.size >= threshold);
    }

    if filters.exclude_article4 {
        narrow(&mut working, policy.min_accepted, "exclude_article4", |p| !p.is_article4);
    }

    if !filters.query.is_empty() {
        let needle = filters.query.to_lowercase();
        narrow(&mut working, 1, "query", |p| matches_text(p, &needle));
    }

    if working.len() < policy.min_results {
        let included: HashSet<&str> = working.iter().map(|p| p.id.as_str()).collect();
        let needed = (policy.min_results - working.len()).max(policy.min_backfill);
        let extra: Vec<&Property> = snapshot
            .iter()
            .filter(|p| !included.contains(p.id.as_str()))
            .take(needed)
            .collect();
        working.extend(extra);
    }

    // Snapshot exhausted and still short: hand back the store as it stands.
    if working.len() < policy.min_results {
        let cap = policy.small_store_cap.max(working.len());
        working = snapshot.iter().take(cap).collect();
    }

    if let Some(sort_by) = filters.sort_by {
        working.sort_by(|a, b| compare(sort_by, a, b));
    }

    working.into_iter().cloned().collect()
}
