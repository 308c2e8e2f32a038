//! Search phase: one task per region, merged under a single lock
//!
//! Region tasks only write to the [`SearchCollection`]. Nothing reads it until
//! every task has been joined and the collection has been frozen into a
//! [`SearchView`].

use super::accumulator::ResultAccumulator;
use super::capabilities::RegionCapabilities;
use super::factory::ClientBundle;
use super::gate::TaskGate;
use super::searcher::search_region;
use super::types::ResourceSummary;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinSet;
use tracing::instrument::WithSubscriber;
use tracing::{Instrument, debug, error, info, info_span, warn};

type RegionMap = BTreeMap<String, Vec<ResourceSummary>>;

/// Write side of the per-region search results
#[derive(Debug, Default)]
pub struct SearchCollection {
    regions: Mutex<RegionMap>,
}

impl SearchCollection {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegionMap> {
        self.regions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one region's results.
    ///
    /// Each region is written once. A second write for the same region is
    /// logged and dropped, and `false` is returned.
    pub fn record(&self, region: &str, items: Vec<ResourceSummary>) -> bool {
        let mut regions = self.lock();
        if regions.contains_key(region) {
            warn!(region = %region, dropped = items.len(), "Region already recorded, ignoring second write");
            return false;
        }
        regions.insert(region.to_string(), items);
        true
    }

    pub fn contains(&self, region: &str) -> bool {
        self.lock().contains_key(region)
    }

    /// Close the collection for writing and hand out the read-only view.
    ///
    /// Called after the search barrier, when this is the last handle.
    pub fn freeze(self: Arc<Self>) -> SearchView {
        let regions = match Arc::try_unwrap(self) {
            Ok(collection) => collection
                .regions
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared.lock().clone(),
        };
        SearchView { regions }
    }
}

/// Read-only merged search results, keyed by region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchView {
    regions: RegionMap,
}

impl SearchView {
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Number of regions in the view
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Results for one region
    pub fn region(&self, region: &str) -> Option<&[ResourceSummary]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    /// Region and result list pairs, in region order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResourceSummary])> {
        self.regions
            .iter()
            .map(|(region, items)| (region.as_str(), items.as_slice()))
    }

    /// Every (region, summary) pair
    pub fn summaries(&self) -> impl Iterator<Item = (&str, &ResourceSummary)> {
        self.iter()
            .flat_map(|(region, items)| items.iter().map(move |item| (region, item)))
    }

    /// Total summaries across all regions
    pub fn item_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Search every region concurrently and wait for all of them.
///
/// Each region's result count is added to `items_found` as it is recorded.
/// A region whose task dies still gets an empty entry, so the view holds
/// exactly one entry per region in the bundle.
pub async fn search_all<R: RegionCapabilities>(
    bundle: &ClientBundle<R>,
    accumulator: &Arc<ResultAccumulator>,
    gate: &TaskGate,
    page_limit: u32,
) -> SearchView {
    let collection = Arc::new(SearchCollection::new());
    let mut tasks = JoinSet::new();

    for (region, client) in bundle.iter() {
        let region = region.to_string();
        let client = Arc::clone(client);
        let collection = Arc::clone(&collection);
        let accumulator = Arc::clone(accumulator);
        let gate = gate.clone();
        let span = info_span!("region", region = %region);

        tasks.spawn(
            async move {
                let _permit = gate.enter().await;
                let items = search_region(client.as_ref(), page_limit).await;
                let count = items.len();
                if collection.record(&region, items) {
                    accumulator.add_items_found(count);
                }
                info!(count, "Region search complete");
            }
            .instrument(span)
            .with_current_subscriber(),
        );
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(error = ?e, "Region search task failed");
        }
    }

    for region in bundle.regions() {
        if !collection.contains(region) {
            warn!(region = %region, "Region produced no results, recording it empty");
            collection.record(region, Vec::new());
        }
    }

    let view = collection.freeze();
    debug!(
        regions = view.len(),
        items = view.item_count(),
        "Search phase complete"
    );
    view
}
