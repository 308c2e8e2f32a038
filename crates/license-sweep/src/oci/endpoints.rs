//! Region names and per-region service endpoints

use super::error::RegionError;
use url::Url;

/// Validated region identifier, e.g. `us-ashburn-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, derive_more::Deref)]
pub struct RegionName(String);

impl RegionName {
    /// Accepts lowercase ASCII letters, digits and dashes, with at least one dash
    pub fn parse(raw: &str) -> Result<Self, RegionError> {
        let valid = !raw.is_empty()
            && raw.contains('-')
            && !raw.starts_with('-')
            && !raw.ends_with('-')
            && raw
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(RegionError::Malformed(raw.to_string()))
        }
    }
}

/// Base URLs of the services the sweep talks to in one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub identity: Url,
    pub query: Url,
    pub database: Url,
    pub analytics: Url,
    pub integration: Url,
}

impl ServiceEndpoints {
    /// Public endpoints for `region`
    pub fn for_region(region: &RegionName) -> Result<Self, RegionError> {
        let build = |service: &str, domain: &str| {
            let raw = format!("https://{service}.{region}.{domain}");
            Url::parse(&raw).map_err(|e| RegionError::Endpoint {
                region: region.to_string(),
                reason: e.to_string(),
            })
        };
        Ok(Self {
            identity: build("identity", "oraclecloud.com")?,
            query: build("query", "oraclecloud.com")?,
            database: build("database", "oraclecloud.com")?,
            analytics: build("analytics", "ocp.oraclecloud.com")?,
            integration: build("integration", "ocp.oraclecloud.com")?,
        })
    }

    /// Every service served from the same base URL
    pub fn uniform(base: &Url) -> Self {
        Self {
            identity: base.clone(),
            query: base.clone(),
            database: base.clone(),
            analytics: base.clone(),
            integration: base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_region_names() {
        for raw in ["us-ashburn-1", "eu-frankfurt-1", "ap-tokyo-1", "us-langley-1"] {
            let region = RegionName::parse(raw).unwrap();
            assert_eq!(region.to_string(), raw);
            assert_eq!(region.len(), raw.len());
        }
    }

    #[test]
    fn test_malformed_region_names() {
        for raw in ["", "useast", "US-ASHBURN-1", "us ashburn 1", "-us-1", "us-1-", "us/ashburn-1"] {
            assert!(
                matches!(RegionName::parse(raw), Err(RegionError::Malformed(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_public_endpoints() {
        let region = RegionName::parse("eu-frankfurt-1").unwrap();
        let endpoints = ServiceEndpoints::for_region(&region).unwrap();
        assert_eq!(
            endpoints.query.as_str(),
            "https://query.eu-frankfurt-1.oraclecloud.com/"
        );
        assert_eq!(
            endpoints.database.host_str(),
            Some("database.eu-frankfurt-1.oraclecloud.com")
        );
        assert_eq!(
            endpoints.analytics.host_str(),
            Some("analytics.eu-frankfurt-1.ocp.oraclecloud.com")
        );
        assert_eq!(
            endpoints.integration.host_str(),
            Some("integration.eu-frankfurt-1.ocp.oraclecloud.com")
        );
    }

    #[test]
    fn test_uniform_endpoints() {
        let base = Url::parse("http://127.0.0.1:9000").unwrap();
        let endpoints = ServiceEndpoints::uniform(&base);
        assert_eq!(endpoints.identity, base);
        assert_eq!(endpoints.integration, base);
    }
}
