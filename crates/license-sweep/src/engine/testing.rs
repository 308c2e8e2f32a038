//! In-crate stub region for engine unit tests.

use super::capabilities::{Corrector, Detailer, Searcher};
use super::factory::RegionConnector;
use super::searcher::QUERIES;
use super::types::{MutationStatus, ResourceSummary};
use anyhow::{Result, bail};
use license_sweep_common::{LicenseModel, LicenseState, LicenseUpdate, ResourceKind};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Region stub: one query returns `summaries`, the rest return nothing.
#[derive(Debug, Default)]
pub struct StubRegion {
    pub summaries: Vec<ResourceSummary>,
    /// Index into `QUERIES` of the query answered with `summaries`
    pub answering_query: usize,
    pub failing_query: Option<usize>,
    pub fail_search: bool,
    pub panic_on_search: bool,
    pub search_delay: Duration,
    pub fail_fetch: bool,
    pub fail_update: bool,
    /// Status reported by updates; the family's expected status when `None`
    pub update_status: Option<u16>,
    pub states: Mutex<HashMap<String, LicenseState>>,
    pub searches: AtomicUsize,
    pub fetches: AtomicUsize,
    pub updates: AtomicUsize,
}

impl StubRegion {
    pub fn with_resource(mut self, kind: ResourceKind, id: &str, state: LicenseState) -> Self {
        self.summaries.push(ResourceSummary::new(id, kind.type_tag()));
        self.states.lock().unwrap().insert(id.to_string(), state);
        self
    }

    pub fn model_of(&self, id: &str) -> Option<LicenseModel> {
        self.states.lock().unwrap().get(id).map(|s| s.model)
    }
}

impl Searcher for StubRegion {
    async fn search(&self, query: &str, _limit: u32) -> Result<Vec<ResourceSummary>> {
        let index = self.searches.fetch_add(1, Ordering::SeqCst);
        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }
        if self.panic_on_search {
            panic!("search task blew up");
        }
        if self.fail_search {
            bail!("search unavailable");
        }
        if self.failing_query == Some(index) {
            bail!("query {index} rejected");
        }
        if QUERIES.get(self.answering_query) == Some(&query) {
            Ok(self.summaries.clone())
        } else {
            Ok(Vec::new())
        }
    }
}

impl Detailer for StubRegion {
    async fn license_state(&self, _kind: ResourceKind, id: &str) -> Result<LicenseState> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            bail!("detail unavailable for {id}");
        }
        match self.states.lock().unwrap().get(id) {
            Some(state) => Ok(*state),
            None => bail!("{id} not found"),
        }
    }
}

impl Corrector for StubRegion {
    async fn update_license(
        &self,
        kind: ResourceKind,
        id: &str,
        update: &LicenseUpdate,
    ) -> Result<MutationStatus> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_update {
            bail!("update rejected for {id}");
        }
        let code = self
            .update_status
            .unwrap_or_else(|| kind.expected_update_status());
        if code == kind.expected_update_status() {
            if let Some(state) = self.states.lock().unwrap().get_mut(id) {
                state.model = update.model;
            }
        }
        Ok(MutationStatus { code })
    }
}

/// Connector handing out empty stub regions, failing for the listed names
#[derive(Debug, Default)]
pub struct StubConnector {
    pub failing: HashSet<String>,
    pub connects: AtomicUsize,
}

impl RegionConnector for StubConnector {
    type Client = StubRegion;

    fn connect(&self, region: &str) -> Result<StubRegion> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(region) {
            bail!("cannot reach {region}");
        }
        Ok(StubRegion::default())
    }
}
