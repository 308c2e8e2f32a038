//! Capability traits the engine needs from a region
//!
//! Each trait covers one kind of call, so the engine can run against the real
//! REST clients or against in-memory fakes without network access.

use super::types::{MutationStatus, ResourceSummary};
use anyhow::Result;
use license_sweep_common::{LicenseState, LicenseUpdate, ResourceKind};
use std::future::Future;

/// Runs a structured resource query.
pub trait Searcher: Send + Sync {
    /// Execute `query`, returning at most `limit` summaries
    fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<ResourceSummary>>> + Send;
}

/// Reads the current license state of a resource.
pub trait Detailer: Send + Sync {
    fn license_state(
        &self,
        kind: ResourceKind,
        id: &str,
    ) -> impl Future<Output = Result<LicenseState>> + Send;
}

/// Applies a corrective license update to a resource.
pub trait Corrector: Send + Sync {
    fn update_license(
        &self,
        kind: ResourceKind,
        id: &str,
        update: &LicenseUpdate,
    ) -> impl Future<Output = Result<MutationStatus>> + Send;
}

/// Everything the engine needs from one region's client bundle
pub trait RegionCapabilities: Searcher + Detailer + Corrector + 'static {}

impl<T> RegionCapabilities for T where T: Searcher + Detailer + Corrector + 'static {}
