//! Resource search service: structured queries

use super::error::ApiError;
use super::http::{OciHttp, resource_url};
use crate::engine::ResourceSummary;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredSearch<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    query: &'a str,
    matching_context_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct SummaryCollection {
    #[serde(default)]
    items: Vec<ResourceSummary>,
}

/// Regional resource search client
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: OciHttp,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(http: OciHttp, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Run a structured query, returning the first `limit` matches
    pub async fn structured(&self, query: &str, limit: u32) -> Result<Vec<ResourceSummary>, ApiError> {
        let mut url = resource_url(&self.endpoint, &["20180409", "resources"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let body = StructuredSearch {
            kind: "Structured",
            query,
            matching_context_type: "NONE",
        };
        let collection: SummaryCollection = self.http.post(url, &body, "resource search").await?;
        Ok(collection.items)
    }
}
