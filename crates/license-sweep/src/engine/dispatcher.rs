//! Correction phase: classify every summary and run its handler
//!
//! One task is spawned per supported summary. The phase ends when every task
//! has been joined.

use super::accumulator::ResultAccumulator;
use super::aggregator::SearchView;
use super::capabilities::RegionCapabilities;
use super::factory::ClientBundle;
use super::gate::TaskGate;
use super::handlers;
use super::types::Outcome;
use license_sweep_common::ResourceKind;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::instrument::WithSubscriber;
use tracing::{Instrument, error, info_span, warn};

/// Tally of one correction phase, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Summaries handed to a handler
    pub dispatched: usize,
    /// Summaries with a type tag no handler covers
    pub unsupported: usize,
    /// Handlers that switched a license
    pub changed: usize,
    /// Handlers that failed a call or died
    pub failed: usize,
}

/// Dispatch every summary in `view` and wait for all handlers.
///
/// Each `Changed` outcome adds one to the accumulator's change count.
pub async fn correct_all<R: RegionCapabilities>(
    bundle: &ClientBundle<R>,
    view: &SearchView,
    accumulator: &Arc<ResultAccumulator>,
    gate: &TaskGate,
    dry_run: bool,
) -> DispatchSummary {
    let mut summary = DispatchSummary::default();
    let mut tasks = JoinSet::new();

    for (region, resource) in view.summaries() {
        let Some(kind) = ResourceKind::from_type_tag(&resource.resource_type) else {
            warn!(
                region = %region,
                resource_id = %resource.identifier,
                resource_type = %resource.resource_type,
                "No supported type"
            );
            summary.unsupported += 1;
            continue;
        };
        let Some(client) = bundle.get(region) else {
            error!(region = %region, resource_id = %resource.identifier, "No client for region");
            summary.failed += 1;
            continue;
        };

        let client = Arc::clone(client);
        let resource = resource.clone();
        let accumulator = Arc::clone(accumulator);
        let gate = gate.clone();
        let span = info_span!(
            "resource",
            region = %region,
            kind = %kind,
            resource_id = %resource.identifier
        );

        tasks.spawn(
            async move {
                let _permit = gate.enter().await;
                let outcome = handlers::correct(client.as_ref(), kind, &resource, dry_run).await;
                if outcome.is_changed() {
                    accumulator.add_changes(1);
                }
                outcome
            }
            .instrument(span)
            .with_current_subscriber(),
        );
        summary.dispatched += 1;
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Outcome::Changed) => summary.changed += 1,
            Ok(Outcome::Unchanged(reason)) if reason.is_failure() => summary.failed += 1,
            Ok(Outcome::Unchanged(_)) => {}
            Err(e) => {
                error!(error = ?e, "Correction task failed");
                summary.failed += 1;
            }
        }
    }

    summary
}
