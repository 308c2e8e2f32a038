//! Database service: database systems and autonomous databases

use super::error::ApiError;
use super::http::{OciHttp, resource_url};
use license_sweep_common::{DatabaseEdition, LicenseModel, LicenseState};
use serde::{Deserialize, Serialize};
use url::Url;

const API_VERSION: &str = "20160918";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DbSystemDetail {
    #[serde(default)]
    license_model: LicenseModel,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AutonomousDatabaseDetail {
    #[serde(default)]
    license_model: LicenseModel,
    #[serde(default)]
    is_free_tier: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LicenseModelUpdate {
    license_model: LicenseModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_edition: Option<DatabaseEdition>,
}

/// Regional database client
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    http: OciHttp,
    endpoint: Url,
}

impl DatabaseClient {
    pub fn new(http: OciHttp, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub async fn db_system_license(&self, id: &str) -> Result<LicenseState, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "dbSystems", id])?;
        let detail: DbSystemDetail = self.http.get(url, "database system").await?;
        Ok(LicenseState::new(detail.license_model))
    }

    pub async fn update_db_system_license(
        &self,
        id: &str,
        model: LicenseModel,
    ) -> Result<u16, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "dbSystems", id])?;
        let body = LicenseModelUpdate {
            license_model: model,
            database_edition: None,
        };
        self.http.put(url, &body).await
    }

    pub async fn autonomous_database_license(&self, id: &str) -> Result<LicenseState, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "autonomousDatabases", id])?;
        let detail: AutonomousDatabaseDetail = self.http.get(url, "autonomous database").await?;
        Ok(LicenseState {
            model: detail.license_model,
            free_tier: detail.is_free_tier.unwrap_or(false),
        })
    }

    /// Switch the license mode; the edition is sent when given
    pub async fn update_autonomous_database_license(
        &self,
        id: &str,
        model: LicenseModel,
        edition: Option<DatabaseEdition>,
    ) -> Result<u16, ApiError> {
        let url = resource_url(&self.endpoint, &[API_VERSION, "autonomousDatabases", id])?;
        let body = LicenseModelUpdate {
            license_model: model,
            database_edition: edition,
        };
        self.http.put(url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payloads() {
        let db = LicenseModelUpdate {
            license_model: LicenseModel::BringYourOwnLicense,
            database_edition: None,
        };
        assert_eq!(
            serde_json::to_string(&db).unwrap(),
            r#"{"licenseModel":"BRING_YOUR_OWN_LICENSE"}"#
        );

        let adb = LicenseModelUpdate {
            license_model: LicenseModel::BringYourOwnLicense,
            database_edition: Some(DatabaseEdition::EnterpriseEdition),
        };
        assert_eq!(
            serde_json::to_string(&adb).unwrap(),
            r#"{"licenseModel":"BRING_YOUR_OWN_LICENSE","databaseEdition":"ENTERPRISE_EDITION"}"#
        );
    }

    #[test]
    fn test_free_tier_defaults_off() {
        let detail: AutonomousDatabaseDetail =
            serde_json::from_str(r#"{"licenseModel":"LICENSE_INCLUDED","dbName":"x"}"#).unwrap();
        assert_eq!(detail.license_model, LicenseModel::LicenseIncluded);
        assert_eq!(detail.is_free_tier, None);
    }
}
