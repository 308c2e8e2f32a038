//! Startup sequence for one invocation
//!
//! Loads credentials, lists the tenancy's region subscriptions and runs the
//! sweep. Only failures in this sequence abort the invocation; they surface
//! as the `error` field of the result.

use crate::config::SweepConfig;
use crate::engine::Sweeper;
use crate::oci::{ApiError, ApiKeyCredentials, CredentialError, OciContext, RegionError, RegionName};
use license_sweep_common::SweepResult;
use thiserror::Error;
use tracing::{error, info};

/// Fatal startup failure
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Error getting API key provider: {0}")]
    Credentials(#[source] CredentialError),

    #[error("Error getting home region: {0}")]
    HomeRegion(#[source] RegionError),

    #[error("Error getting HTTP client: {0}")]
    HttpClient(#[source] ApiError),

    #[error("Error getting Identity client: {0}")]
    IdentityClient(#[source] RegionError),

    #[error("Error getting regions subscription: {0}")]
    Regions(#[source] ApiError),
}

impl StartupError {
    /// A hint for resolving the underlying service error, if known
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            StartupError::Regions(e) | StartupError::HttpClient(e) => e.suggestion(),
            _ => None,
        }
    }
}

/// Run one invocation, turning a startup failure into an error result
pub async fn invoke(config: &SweepConfig) -> SweepResult {
    match try_invoke(config).await {
        Ok(result) => result,
        Err(e) => {
            match e.suggestion() {
                Some(hint) => error!(error = %e, hint, "Sweep could not start"),
                None => error!(error = %e, "Sweep could not start"),
            }
            SweepResult::failed(e.to_string())
        }
    }
}

/// Run one invocation
pub async fn try_invoke(config: &SweepConfig) -> Result<SweepResult, StartupError> {
    let creds = &config.credentials;
    let credentials = ApiKeyCredentials::from_key_file(
        &creds.tenancy,
        &creds.user,
        &creds.fingerprint,
        &creds.key_file,
    )
    .map_err(StartupError::Credentials)?;

    let home_region = RegionName::parse(&config.home_region).map_err(StartupError::HomeRegion)?;
    let context = OciContext::new(
        credentials,
        home_region,
        config.http.request_timeout,
        config.http.endpoint_override.clone(),
    )
    .map_err(StartupError::HttpClient)?;

    let identity = context
        .identity_client()
        .map_err(StartupError::IdentityClient)?;
    let subscriptions = identity
        .list_region_subscriptions(context.tenancy())
        .await
        .map_err(StartupError::Regions)?;

    let regions: Vec<String> = subscriptions
        .into_iter()
        .map(|subscription| subscription.region_name)
        .collect();
    info!(
        home_region = %context.home_region(),
        regions = ?regions,
        "Listed region subscriptions"
    );

    let sweeper = Sweeper::new(config.sweep_options());
    Ok(sweeper.run(&context.connector(), &regions).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialConfig;

    #[tokio::test]
    async fn test_missing_key_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = SweepConfig {
            credentials: CredentialConfig {
                tenancy: "ocid1.tenancy.oc1..t".to_string(),
                user: "ocid1.user.oc1..u".to_string(),
                fingerprint: "aa:bb".to_string(),
                key_file: dir.path().join("absent.pem"),
            },
            home_region: "us-ashburn-1".to_string(),
            ..Default::default()
        };

        let result = invoke(&config).await;

        assert!(result.message.is_none());
        assert_eq!(result.items_found, 0);
        assert_eq!(result.license_changes, 0);
        assert!(
            result
                .error
                .as_deref()
                .unwrap()
                .starts_with("Error getting API key provider: Could not read key file")
        );
    }

    #[test]
    fn test_error_messages() {
        let err = StartupError::HomeRegion(RegionError::Malformed("nowhere".to_string()));
        assert_eq!(
            err.to_string(),
            "Error getting home region: Malformed region identifier 'nowhere'"
        );
        assert_eq!(err.suggestion(), None);

        let err = StartupError::Regions(ApiError::Service {
            status: 401,
            code: Some("NotAuthenticated".to_string()),
            message: "bad signature".to_string(),
            opc_request_id: None,
        });
        assert!(err.to_string().starts_with("Error getting regions subscription: "));
        assert!(err.suggestion().is_some());
    }
}
