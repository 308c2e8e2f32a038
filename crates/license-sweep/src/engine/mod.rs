//! Concurrent discovery-and-reconciliation engine
//!
//! A sweep runs in two phases separated by full barriers:
//!
//! 1. search every region concurrently and merge the results
//! 2. run one correction handler per discovered resource
//!
//! The final [`SweepResult`] is read only after both phases have drained.

pub mod accumulator;
pub mod aggregator;
pub mod capabilities;
pub mod dispatcher;
pub mod factory;
pub mod gate;
pub mod handlers;
pub mod searcher;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use accumulator::ResultAccumulator;
pub use aggregator::{SearchCollection, SearchView};
pub use capabilities::{Corrector, Detailer, RegionCapabilities, Searcher};
pub use dispatcher::DispatchSummary;
pub use factory::{ClientBundle, RegionConnector};
pub use gate::TaskGate;
pub use types::{MutationStatus, Outcome, ResourceSummary, UnchangedReason};

use license_sweep_common::SweepResult;
use license_sweep_common::defaults::{COMPLETION_MESSAGE, DEFAULT_MAX_CONCURRENCY, SEARCH_PAGE_LIMIT};
use std::sync::Arc;
use tracing::{Level, debug, info, warn};

/// Knobs for one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOptions {
    /// Cap on in-flight tasks per phase; `0` disables the cap
    pub max_concurrency: usize,
    /// Evaluate every resource but never issue updates
    pub dry_run: bool,
    /// Items requested per search query
    pub page_limit: u32,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dry_run: false,
            page_limit: SEARCH_PAGE_LIMIT,
        }
    }
}

/// Runs one sweep over a set of regions
#[derive(Debug, Clone)]
pub struct Sweeper {
    options: SweepOptions,
    gate: TaskGate,
}

impl Sweeper {
    pub fn new(options: SweepOptions) -> Self {
        Self {
            gate: TaskGate::new(options.max_concurrency),
            options,
        }
    }

    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    /// Connect to `regions` and sweep the ones that connected
    pub async fn run<C: RegionConnector>(&self, connector: &C, regions: &[String]) -> SweepResult {
        let bundle = ClientBundle::build(connector, regions);
        self.sweep(&bundle).await
    }

    /// Sweep every region in `bundle`.
    ///
    /// Never fails: region and resource errors are logged and only show up as
    /// missing counts.
    pub async fn sweep<R: RegionCapabilities>(&self, bundle: &ClientBundle<R>) -> SweepResult {
        info!(
            regions = bundle.len(),
            dry_run = self.options.dry_run,
            max_concurrency = self.options.max_concurrency,
            "Starting license sweep"
        );

        let accumulator = Arc::new(ResultAccumulator::new());

        let view =
            aggregator::search_all(bundle, &accumulator, &self.gate, self.options.page_limit).await;

        if tracing::enabled!(Level::DEBUG) {
            match view.to_json() {
                Ok(json) => debug!(collection = %json, "Merged search results"),
                Err(e) => warn!(error = ?e, "Could not serialize search results"),
            }
        }

        let dispatch = dispatcher::correct_all(
            bundle,
            &view,
            &accumulator,
            &self.gate,
            self.options.dry_run,
        )
        .await;

        info!(
            dispatched = dispatch.dispatched,
            unsupported = dispatch.unsupported,
            changed = dispatch.changed,
            failed = dispatch.failed,
            "Correction phase complete"
        );

        let result = accumulator.finish(COMPLETION_MESSAGE);
        info!(
            items_found = result.items_found,
            license_changes = result.license_changes,
            "License sweep complete"
        );
        result
    }
}
