//! In-memory regions for driving the engine without a network
//!
//! A [`FakeRegion`] is a cloneable handle to shared state, so a test can keep
//! one handle and inspect it after the engine has consumed the other.

use anyhow::{Result, bail};
use license_sweep::engine::{
    Corrector, Detailer, MutationStatus, RegionConnector, ResourceSummary, Searcher,
};
use license_sweep_common::{LicenseModel, LicenseState, LicenseUpdate, ResourceKind};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Query keyword selecting each resource family
fn keyword(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::DbSystem => "dbsystem",
        ResourceKind::AutonomousDatabase => "autonomousdatabase",
        ResourceKind::AnalyticsInstance => "analyticsinstance",
        ResourceKind::IntegrationInstance => "integrationinstance",
    }
}

/// One call made against a fake region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    Fetch(String),
    Update { id: String, update: LicenseUpdate },
}

#[derive(Debug, Clone)]
struct FakeResource {
    kind: ResourceKind,
    state: LicenseState,
    fail_fetch: bool,
    fail_update: bool,
    update_status: Option<u16>,
}

#[derive(Debug, Default)]
struct FakeState {
    resources: BTreeMap<String, FakeResource>,
    unsupported: Vec<ResourceSummary>,
    failing_keywords: BTreeSet<String>,
    fail_search: bool,
    search_delay: Duration,
    calls: Vec<Call>,
}

/// Scripted region: resources, injected failures and a call log.
///
/// A search returns every resource whose family keyword appears in the
/// query. Summaries with unsupported type tags come back with the query that
/// mentions `autonomousdatabase`. A successful update switches the resource
/// to the requested license mode.
#[derive(Debug, Clone, Default)]
pub struct FakeRegion {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeRegion {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap()
    }

    fn edit(self, id: &str, f: impl FnOnce(&mut FakeResource)) -> Self {
        if let Some(resource) = self.state().resources.get_mut(id) {
            f(resource);
        }
        self
    }

    /// Add a resource of a supported family
    pub fn with_resource(self, kind: ResourceKind, id: &str, state: LicenseState) -> Self {
        self.state().resources.insert(
            id.to_string(),
            FakeResource {
                kind,
                state,
                fail_fetch: false,
                fail_update: false,
                update_status: None,
            },
        );
        self
    }

    /// Add a summary whose type tag no handler covers
    pub fn with_unsupported(self, id: &str, type_tag: &str) -> Self {
        self.state()
            .unsupported
            .push(ResourceSummary::new(id, type_tag));
        self
    }

    pub fn failing_fetch(self, id: &str) -> Self {
        self.edit(id, |r| r.fail_fetch = true)
    }

    pub fn failing_update(self, id: &str) -> Self {
        self.edit(id, |r| r.fail_update = true)
    }

    /// Answer updates of `id` with `code` instead of the family's success code
    pub fn with_update_status(self, id: &str, code: u16) -> Self {
        self.edit(id, |r| r.update_status = Some(code))
    }

    /// Fail every query mentioning `keyword`
    pub fn failing_query(self, keyword: &str) -> Self {
        self.state().failing_keywords.insert(keyword.to_string());
        self
    }

    /// Fail every query
    pub fn failing_search(self) -> Self {
        self.state().fail_search = true;
        self
    }

    pub fn with_search_delay(self, delay: Duration) -> Self {
        self.state().search_delay = delay;
        self
    }

    pub fn license_model(&self, id: &str) -> Option<LicenseModel> {
        self.state().resources.get(id).map(|r| r.state.model)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn search_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Search(_)))
            .count()
    }

    pub fn updates_for(&self, id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Update { id: updated, .. } if updated == id))
            .count()
    }

    pub fn update_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .count()
    }
}

impl Searcher for FakeRegion {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<ResourceSummary>> {
        let delay = {
            let mut state = self.state();
            state.calls.push(Call::Search(query.to_string()));
            state.search_delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let state = self.state();
        if state.fail_search {
            bail!("search service unavailable");
        }
        if let Some(keyword) = state
            .failing_keywords
            .iter()
            .find(|k| query.contains(k.as_str()))
        {
            bail!("query for {keyword} rejected");
        }

        let mut items: Vec<ResourceSummary> = state
            .resources
            .iter()
            .filter(|(_, r)| query.contains(keyword(r.kind)))
            .map(|(id, r)| ResourceSummary::new(id.as_str(), r.kind.type_tag()))
            .collect();
        if query.contains(keyword(ResourceKind::AutonomousDatabase)) {
            items.extend(state.unsupported.iter().cloned());
        }
        items.truncate(limit as usize);
        Ok(items)
    }
}

impl Detailer for FakeRegion {
    async fn license_state(&self, kind: ResourceKind, id: &str) -> Result<LicenseState> {
        let mut state = self.state();
        state.calls.push(Call::Fetch(id.to_string()));
        match state.resources.get(id) {
            Some(r) if r.fail_fetch => bail!("{id} detail unavailable"),
            Some(r) if r.kind != kind => bail!("{id} is a {}, not a {kind}", r.kind),
            Some(r) => Ok(r.state),
            None => bail!("{id} not found"),
        }
    }
}

impl Corrector for FakeRegion {
    async fn update_license(
        &self,
        kind: ResourceKind,
        id: &str,
        update: &LicenseUpdate,
    ) -> Result<MutationStatus> {
        let mut state = self.state();
        state.calls.push(Call::Update {
            id: id.to_string(),
            update: *update,
        });
        let Some(resource) = state.resources.get_mut(id) else {
            bail!("{id} not found");
        };
        if resource.fail_update {
            bail!("{id} update rejected");
        }

        let expected = kind.expected_update_status();
        let code = resource.update_status.unwrap_or(expected);
        if code == expected {
            resource.state.model = update.model;
        }
        Ok(MutationStatus { code })
    }
}

/// Connector handing out fake regions by name.
///
/// Unknown names connect to an empty region; names marked failing refuse.
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    regions: BTreeMap<String, FakeRegion>,
    failing: BTreeSet<String>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, name: &str, region: FakeRegion) -> Self {
        self.regions.insert(name.to_string(), region);
        self
    }

    pub fn failing_region(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }
}

impl RegionConnector for FakeConnector {
    type Client = FakeRegion;

    fn connect(&self, region: &str) -> Result<FakeRegion> {
        if self.failing.contains(region) {
            bail!("could not derive client for {region}");
        }
        Ok(self.regions.get(region).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_QUERIES: &str = "query autonomousdatabase, analyticsinstance, dbsystem, integrationinstance";

    #[tokio::test]
    async fn test_search_matches_keywords() {
        let region = FakeRegion::new()
            .with_resource(
                ResourceKind::DbSystem,
                "db-1",
                LicenseState::new(LicenseModel::LicenseIncluded),
            )
            .with_resource(
                ResourceKind::IntegrationInstance,
                "oic-1",
                LicenseState::new(LicenseModel::LicenseIncluded),
            )
            .with_unsupported("vol-1", "BootVolume");

        let db = region.search("query dbsystem resources", 1000).await.unwrap();
        assert_eq!(db, vec![ResourceSummary::new("db-1", "DbSystem")]);

        let first = region
            .search("query autonomousdatabase, analyticsinstance resources", 1000)
            .await
            .unwrap();
        assert_eq!(first, vec![ResourceSummary::new("vol-1", "BootVolume")]);

        assert_eq!(region.search(ALL_QUERIES, 1).await.unwrap().len(), 1);
        assert_eq!(region.search_count(), 3);
    }

    #[tokio::test]
    async fn test_update_flips_state() {
        let region = FakeRegion::new().with_resource(
            ResourceKind::AnalyticsInstance,
            "ai-1",
            LicenseState::new(LicenseModel::LicenseIncluded),
        );
        let handle = region.clone();

        let status = region
            .update_license(
                ResourceKind::AnalyticsInstance,
                "ai-1",
                &LicenseUpdate::byol_for(ResourceKind::AnalyticsInstance),
            )
            .await
            .unwrap();

        assert_eq!(status.code, 200);
        assert_eq!(
            handle.license_model("ai-1"),
            Some(LicenseModel::BringYourOwnLicense)
        );
        assert_eq!(handle.updates_for("ai-1"), 1);
    }

    #[tokio::test]
    async fn test_unexpected_status_keeps_state() {
        let region = FakeRegion::new()
            .with_resource(
                ResourceKind::IntegrationInstance,
                "oic-1",
                LicenseState::new(LicenseModel::LicenseIncluded),
            )
            .with_update_status("oic-1", 200);

        let status = region
            .update_license(
                ResourceKind::IntegrationInstance,
                "oic-1",
                &LicenseUpdate::byol_for(ResourceKind::IntegrationInstance),
            )
            .await
            .unwrap();

        assert_eq!(status.code, 200);
        assert_eq!(
            region.license_model("oic-1"),
            Some(LicenseModel::LicenseIncluded)
        );
    }

    #[test]
    fn test_connector_failures() {
        let connector = FakeConnector::new().failing_region("bad-1");
        assert!(connector.connect("bad-1").is_err());
        assert!(connector.connect("good-1").is_ok());
    }
}
