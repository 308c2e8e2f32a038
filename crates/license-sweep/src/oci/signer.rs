//! HTTP signature request signing
//!
//! Every request signs `date`, `(request-target)` and `host`. Requests with a
//! body also sign `content-length`, `content-type` and `x-content-sha256`.

use super::credentials::ApiKeyCredentials;
use super::error::ApiError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use reqwest::Method;
use ring::digest::{SHA256, digest};
use url::Url;

const JSON: &str = "application/json";

/// Headers to attach to a signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub headers: Vec<(&'static str, String)>,
}

impl SignedHeaders {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Signs outgoing requests with one set of API key credentials
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: ApiKeyCredentials,
}

impl RequestSigner {
    pub fn new(credentials: ApiKeyCredentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &ApiKeyCredentials {
        &self.credentials
    }

    /// Compute the headers for a request sent now
    pub fn sign(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
    ) -> Result<SignedHeaders, ApiError> {
        self.sign_at(method, url, body, Utc::now())
    }

    /// Compute the headers for a request dated `at`
    pub fn sign_at(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        at: DateTime<Utc>,
    ) -> Result<SignedHeaders, ApiError> {
        let mut headers = vec![
            ("date", http_date(at)),
            ("(request-target)", request_target(method, url)),
            ("host", host(url)?),
        ];
        if let Some(body) = body {
            headers.push(("content-length", body.len().to_string()));
            headers.push(("content-type", JSON.to_string()));
            headers.push(("x-content-sha256", STANDARD.encode(digest(&SHA256, body))));
        }

        let signature = self.credentials.sign(signing_string(&headers).as_bytes())?;
        let names: Vec<&str> = headers.iter().map(|(name, _)| *name).collect();
        let authorization = format!(
            r#"Signature version="1",keyId="{}",algorithm="rsa-sha256",headers="{}",signature="{}""#,
            self.credentials.key_id(),
            names.join(" "),
            STANDARD.encode(signature),
        );

        headers.retain(|(name, _)| *name != "(request-target)");
        headers.push(("authorization", authorization));
        Ok(SignedHeaders { headers })
    }
}

/// `name: value` lines joined by newlines, in signing order
pub fn signing_string(headers: &[(&str, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn request_target(method: &Method, url: &Url) -> String {
    let mut target = format!("{} {}", method.as_str().to_lowercase(), url.path());
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// Host header value: host, plus the port when it is not the scheme default
fn host(url: &Url) -> Result<String, ApiError> {
    let host = url
        .host_str()
        .ok_or_else(|| ApiError::Request(format!("URL has no host: {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ring::signature::{RSA_PKCS1_2048_8192_SHA256, UnparsedPublicKey};

    const PEM: &str = include_str!("../../../license-sweep-test-utils/fixtures/test_key.pem");

    fn signer() -> RequestSigner {
        RequestSigner::new(
            ApiKeyCredentials::from_pem("ocid1.tenancy.oc1..t", "ocid1.user.oc1..u", "aa:bb", PEM)
                .unwrap(),
        )
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
    }

    fn signature_of(authorization: &str) -> Vec<u8> {
        let encoded = authorization
            .split("signature=\"")
            .nth(1)
            .and_then(|s| s.strip_suffix('"'))
            .unwrap();
        STANDARD.decode(encoded).unwrap()
    }

    #[test]
    fn test_date_format() {
        assert_eq!(http_date(fixed_time()), "Tue, 05 Mar 2024 07:08:09 GMT");
    }

    #[test]
    fn test_get_request_signing() {
        let url = Url::parse(
            "https://identity.us-ashburn-1.oraclecloud.com/20160918/tenancies/t/regionSubscriptions",
        )
        .unwrap();
        let signer = signer();
        let signed = signer
            .sign_at(&Method::GET, &url, None, fixed_time())
            .unwrap();

        let authorization = signed.get("authorization").unwrap();
        assert!(authorization.starts_with(
            r#"Signature version="1",keyId="ocid1.tenancy.oc1..t/ocid1.user.oc1..u/aa:bb",algorithm="rsa-sha256",headers="date (request-target) host""#
        ));
        assert_eq!(
            signed.get("host"),
            Some("identity.us-ashburn-1.oraclecloud.com")
        );
        assert_eq!(signed.get("x-content-sha256"), None);
        assert_eq!(signed.get("(request-target)"), None);

        let expected = "date: Tue, 05 Mar 2024 07:08:09 GMT\n\
             (request-target): get /20160918/tenancies/t/regionSubscriptions\n\
             host: identity.us-ashburn-1.oraclecloud.com";
        let public = signer.credentials().public_key_der();
        UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, &public)
            .verify(expected.as_bytes(), &signature_of(authorization))
            .unwrap();
    }

    #[test]
    fn test_body_request_signing() {
        let url = Url::parse("http://127.0.0.1:8080/20180409/resources?limit=1000").unwrap();
        let body = br#"{"type":"Structured"}"#;
        let signed = signer()
            .sign_at(&Method::POST, &url, Some(body), fixed_time())
            .unwrap();

        assert!(signed.get("authorization").unwrap().contains(
            r#"headers="date (request-target) host content-length content-type x-content-sha256""#
        ));
        assert_eq!(signed.get("host"), Some("127.0.0.1:8080"));
        assert_eq!(signed.get("content-length"), Some("21"));
        assert_eq!(signed.get("content-type"), Some(JSON));
        assert_eq!(
            signed.get("x-content-sha256"),
            Some(STANDARD.encode(digest(&SHA256, body)).as_str())
        );
    }

    #[test]
    fn test_request_target_keeps_query() {
        let url = Url::parse("https://query.example.com/20180409/resources?limit=1000").unwrap();
        assert_eq!(
            request_target(&Method::POST, &url),
            "post /20180409/resources?limit=1000"
        );
    }
}
