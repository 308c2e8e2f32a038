//! Signed JSON requests over a shared HTTP client

use super::error::ApiError;
use super::signer::RequestSigner;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Signing HTTP client shared by every region.
///
/// Clones share the connection pool and the signing key.
#[derive(Debug, Clone)]
pub struct OciHttp {
    client: Client,
    signer: RequestSigner,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl OciHttp {
    /// Build the client; `timeout` bounds each request when set
    pub fn new(signer: RequestSigner, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            signer,
        })
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// GET `url` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, url: Url, what: &'static str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, url, None).await?;
        decode(response, what).await
    }

    /// POST a JSON body and decode the JSON answer
    pub async fn post<B, T>(&self, url: Url, body: &B, what: &'static str) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        decode(response, what).await
    }

    /// PUT a JSON body, returning the success status code.
    ///
    /// The answer body is not needed by any caller and is discarded.
    pub async fn put<B>(&self, url: Url, body: &B) -> Result<u16, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        let response = self.send(Method::PUT, url, Some(body)).await?;
        Ok(response.status().as_u16())
    }

    /// Sign and send a request, turning non-success answers into errors
    async fn send(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Response, ApiError> {
        let signed = self.signer.sign(&method, &url, body.as_deref())?;
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.client.request(method, url);
        for (name, value) in &signed.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!(status = status.as_u16(), "Received response");
        if status.is_success() {
            return Ok(response);
        }

        let opc_request_id = response
            .headers()
            .get("opc-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let parsed: Option<ErrorBody> = serde_json::from_slice(&bytes).ok();
        let (code, message) = match parsed {
            Some(body) => (body.code, body.message),
            None => (None, None),
        };

        Err(ApiError::Service {
            status: status.as_u16(),
            code,
            message: message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            }),
            opc_request_id,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { what, source })
}

/// Append path segments to a service base URL
pub fn resource_url(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::Request(format!("cannot add a path to {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url() {
        let base = Url::parse("https://database.us-ashburn-1.oraclecloud.com").unwrap();
        let url = resource_url(&base, &["20160918", "dbSystems", "ocid1.dbsystem.oc1..x"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://database.us-ashburn-1.oraclecloud.com/20160918/dbSystems/ocid1.dbsystem.oc1..x"
        );
    }

    #[test]
    fn test_resource_url_escapes_segments() {
        let base = Url::parse("http://127.0.0.1:1234/").unwrap();
        let url = resource_url(&base, &["a", "b/c"]).unwrap();
        assert_eq!(url.path(), "/a/b%2Fc");
    }

    #[test]
    fn test_resource_url_rejects_opaque_base() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            resource_url(&base, &["x"]),
            Err(ApiError::Request(_))
        ));
    }
}
