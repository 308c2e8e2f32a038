//! Identity service: tenancy region subscriptions

use super::error::ApiError;
use super::http::{OciHttp, resource_url};
use serde::Deserialize;
use url::Url;

/// One region the tenancy is subscribed to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSubscription {
    pub region_key: String,
    pub region_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_home_region: bool,
}

/// Home-region identity client
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: OciHttp,
    endpoint: Url,
}

impl IdentityClient {
    pub fn new(http: OciHttp, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// All region subscriptions of `tenancy`
    pub async fn list_region_subscriptions(
        &self,
        tenancy: &str,
    ) -> Result<Vec<RegionSubscription>, ApiError> {
        let url = resource_url(
            &self.endpoint,
            &["20160918", "tenancies", tenancy, "regionSubscriptions"],
        )?;
        self.http.get(url, "region subscriptions").await
    }
}
