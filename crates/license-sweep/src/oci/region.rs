//! Region-scoped client implementing the engine capabilities

use super::analytics::AnalyticsClient;
use super::database::DatabaseClient;
use super::endpoints::{RegionName, ServiceEndpoints};
use super::http::OciHttp;
use super::integration::IntegrationClient;
use super::search::SearchClient;
use crate::engine::{Corrector, Detailer, MutationStatus, RegionConnector, ResourceSummary, Searcher};
use anyhow::{Context, Result};
use license_sweep_common::{LicenseState, LicenseUpdate, ResourceKind};
use url::Url;

/// Service clients for one region
#[derive(Debug, Clone)]
pub struct OciRegionClient {
    region: RegionName,
    search: SearchClient,
    database: DatabaseClient,
    analytics: AnalyticsClient,
    integration: IntegrationClient,
}

impl OciRegionClient {
    pub fn new(http: &OciHttp, region: RegionName, endpoints: ServiceEndpoints) -> Self {
        Self {
            region,
            search: SearchClient::new(http.clone(), endpoints.query),
            database: DatabaseClient::new(http.clone(), endpoints.database),
            analytics: AnalyticsClient::new(http.clone(), endpoints.analytics),
            integration: IntegrationClient::new(http.clone(), endpoints.integration),
        }
    }

    pub fn region(&self) -> &RegionName {
        &self.region
    }
}

impl Searcher for OciRegionClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<ResourceSummary>> {
        self.search
            .structured(query, limit)
            .await
            .with_context(|| format!("Failed to search resources in {}", self.region))
    }
}

impl Detailer for OciRegionClient {
    async fn license_state(&self, kind: ResourceKind, id: &str) -> Result<LicenseState> {
        let state = match kind {
            ResourceKind::DbSystem => self.database.db_system_license(id).await,
            ResourceKind::AutonomousDatabase => self.database.autonomous_database_license(id).await,
            ResourceKind::AnalyticsInstance => self.analytics.instance_license(id).await,
            ResourceKind::IntegrationInstance => self.integration.instance_license(id).await,
        };
        state.with_context(|| format!("Failed to get {kind} {id}"))
    }
}

impl Corrector for OciRegionClient {
    async fn update_license(
        &self,
        kind: ResourceKind,
        id: &str,
        update: &LicenseUpdate,
    ) -> Result<MutationStatus> {
        let code = match kind {
            ResourceKind::DbSystem => {
                self.database
                    .update_db_system_license(id, update.model)
                    .await
            }
            ResourceKind::AutonomousDatabase => {
                self.database
                    .update_autonomous_database_license(id, update.model, update.database_edition)
                    .await
            }
            ResourceKind::AnalyticsInstance => {
                self.analytics
                    .update_instance_license(id, update.model)
                    .await
            }
            ResourceKind::IntegrationInstance => {
                self.integration
                    .update_instance_license(id, update.model)
                    .await
            }
        }
        .with_context(|| format!("Failed to update {kind} {id}"))?;
        Ok(MutationStatus { code })
    }
}

/// Derives region clients from the shared HTTP client
#[derive(Debug, Clone)]
pub struct OciConnector {
    http: OciHttp,
    endpoint_override: Option<Url>,
}

impl OciConnector {
    /// `endpoint_override` replaces every regional endpoint when set
    pub fn new(http: OciHttp, endpoint_override: Option<Url>) -> Self {
        Self {
            http,
            endpoint_override,
        }
    }
}

impl RegionConnector for OciConnector {
    type Client = OciRegionClient;

    fn connect(&self, region: &str) -> Result<OciRegionClient> {
        let region = RegionName::parse(region)?;
        let endpoints = match &self.endpoint_override {
            Some(base) => ServiceEndpoints::uniform(base),
            None => ServiceEndpoints::for_region(&region)?,
        };
        Ok(OciRegionClient::new(&self.http, region, endpoints))
    }
}
