//! Integration service: integration instances
//!
//! License mode is a boolean `isByol` flag here, and updates are accepted
//! asynchronously (`202`).

use super::error::ApiError;
use super::http::{OciHttp, resource_url};
use license_sweep_common::{LicenseModel, LicenseState};
use serde::{Deserialize, Serialize};
use url::Url;

const API_VERSION: &str = "20190131";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct ByolFlag {
    #[serde(default)]
    is_byol: bool,
}

/// Regional integration client
#[derive(Debug, Clone)]
pub struct IntegrationClient {
    http: OciHttp,
    endpoint: Url,
}

impl IntegrationClient {
    pub fn new(http: OciHttp, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub async fn instance_license(&self, id: &str) -> Result<LicenseState, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "integrationInstances", id])?;
        let detail: ByolFlag = self.http.get(url, "integration instance").await?;
        Ok(LicenseState::new(LicenseModel::from_byol_flag(detail.is_byol)))
    }

    pub async fn update_instance_license(
        &self,
        id: &str,
        model: LicenseModel,
    ) -> Result<u16, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "integrationInstances", id])?;
        let body = ByolFlag {
            is_byol: model.is_byol(),
        };
        self.http.put(url, &body).await
    }
}
