//! Analytics service: analytics instances

use super::error::ApiError;
use super::http::{OciHttp, resource_url};
use license_sweep_common::{LicenseModel, LicenseState};
use serde::{Deserialize, Serialize};
use url::Url;

const API_VERSION: &str = "20190331";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LicenseType {
    #[serde(default)]
    license_type: LicenseModel,
}

/// Regional analytics client
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: OciHttp,
    endpoint: Url,
}

impl AnalyticsClient {
    pub fn new(http: OciHttp, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub async fn instance_license(&self, id: &str) -> Result<LicenseState, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "analyticsInstances", id])?;
        let detail: LicenseType = self.http.get(url, "analytics instance").await?;
        Ok(LicenseState::new(detail.license_type))
    }

    pub async fn update_instance_license(
        &self,
        id: &str,
        model: LicenseModel,
    ) -> Result<u16, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "analyticsInstances", id])?;
        self.http.put(url, &LicenseType { license_type: model }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload() {
        let body = LicenseType {
            license_type: LicenseModel::BringYourOwnLicense,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"licenseType":"BRING_YOUR_OWN_LICENSE"}"#
        );
    }
}
