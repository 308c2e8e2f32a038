//! Shared OCI context
//!
//! Loads the signing credentials once and hands out the identity client and
//! the region connector built from them.

use super::credentials::ApiKeyCredentials;
use super::endpoints::{RegionName, ServiceEndpoints};
use super::error::{ApiError, RegionError};
use super::http::OciHttp;
use super::identity::IdentityClient;
use super::region::OciConnector;
use super::signer::RequestSigner;
use std::time::Duration;
use url::Url;

/// Credentials, home region and HTTP client for one invocation
#[derive(Debug, Clone)]
pub struct OciContext {
    http: OciHttp,
    home_region: RegionName,
    endpoint_override: Option<Url>,
}

impl OciContext {
    pub fn new(
        credentials: ApiKeyCredentials,
        home_region: RegionName,
        timeout: Option<Duration>,
        endpoint_override: Option<Url>,
    ) -> Result<Self, ApiError> {
        let http = OciHttp::new(RequestSigner::new(credentials), timeout)?;
        Ok(Self {
            http,
            home_region,
            endpoint_override,
        })
    }

    /// Tenancy OCID the credentials belong to
    pub fn tenancy(&self) -> &str {
        self.http.signer().credentials().tenancy()
    }

    pub fn home_region(&self) -> &RegionName {
        &self.home_region
    }

    fn endpoints(&self, region: &RegionName) -> Result<ServiceEndpoints, RegionError> {
        match &self.endpoint_override {
            Some(base) => Ok(ServiceEndpoints::uniform(base)),
            None => ServiceEndpoints::for_region(region),
        }
    }

    /// Identity client for the home region
    pub fn identity_client(&self) -> Result<IdentityClient, RegionError> {
        let endpoints = self.endpoints(&self.home_region)?;
        Ok(IdentityClient::new(self.http.clone(), endpoints.identity))
    }

    /// Connector deriving a client per subscribed region
    pub fn connector(&self) -> OciConnector {
        OciConnector::new(self.http.clone(), self.endpoint_override.clone())
    }
}
