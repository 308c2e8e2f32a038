//! Per-region resource discovery
//!
//! Runs the fixed query set against one region and unions the results.
//! Each query is capped at one page; pagination is not followed.

use super::capabilities::Searcher;
use super::types::ResourceSummary;
use tracing::{debug, error};

/// Autonomous databases and analytics instances in any usable lifecycle state
pub const LICENSED_SERVICES_QUERY: &str = "query autonomousdatabase, analyticsinstance resources \
     where lifeCycleState = 'RUNNING' || lifeCycleState = 'STOPPED' || lifeCycleState = 'AVAILABLE' \
     || lifeCycleState = 'ACTIVE' || lifeCycleState = 'INACTIVE'";

/// Available database systems still on a license-included model
pub const DB_SYSTEM_QUERY: &str = "query dbsystem resources where lifeCycleState = 'AVAILABLE' \
     && licenseType = 'LICENSE_INCLUDED'";

/// Active integration instances not yet on BYOL
pub const INTEGRATION_QUERY: &str =
    "query integrationinstance resources where isbyol = 'false' && lifeCycleState = 'ACTIVE'";

/// Queries run against every region, in order
pub const QUERIES: [&str; 3] = [LICENSED_SERVICES_QUERY, DB_SYSTEM_QUERY, INTEGRATION_QUERY];

/// Run every query against one region and union the results.
///
/// A failing query is logged and contributes nothing; the remaining queries
/// still run. If every query fails the region yields an empty list.
pub async fn search_region<S>(searcher: &S, limit: u32) -> Vec<ResourceSummary>
where
    S: Searcher + ?Sized,
{
    let mut items = Vec::new();

    for query in QUERIES {
        match searcher.search(query, limit).await {
            Ok(found) => {
                if found.len() >= limit as usize {
                    debug!(
                        limit,
                        "Query returned a full page, further results are not fetched"
                    );
                }
                items.extend(found);
            }
            Err(e) => {
                error!(query = %query, error = ?e, "Resource search failed, continuing");
            }
        }
    }

    items
}
