//! OCI REST error classification
//!
//! Service errors carry a JSON body `{"code": "...", "message": "..."}`.
//! Classification uses the service error code first and the HTTP status
//! second.

use thiserror::Error;

/// Failure of one REST call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be built (bad URL, unsupported body)
    #[error("Invalid request: {0}")]
    Request(String),

    /// Connection, TLS or timeout failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Service error {status} ({}): {message}", .code.as_deref().unwrap_or("no code"))]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
        opc_request_id: Option<String>,
    },

    /// Response body did not match the expected shape
    #[error("Could not decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be serialized
    #[error("Could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Request could not be signed
    #[error("Could not sign request: {0}")]
    Signing(String),
}

/// Service codes for a missing (or invisible) resource
const NOT_FOUND_CODES: &[&str] = &["NotAuthorizedOrNotFound", "NotFound", "NamespaceNotFound"];

/// Service codes for rate limiting
const THROTTLING_CODES: &[&str] = &["TooManyRequests"];

/// Service codes for rejected credentials or signatures
const AUTH_CODES: &[&str] = &["NotAuthenticated", "SignUpRequired", "NotAuthorized"];

/// Service codes for a resource in the wrong state for the update
const CONFLICT_CODES: &[&str] = &["IncorrectState", "Conflict", "InvalidatedRetryToken"];

impl ApiError {
    /// Service error code, if the service returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, if a response arrived
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the resource does not exist or is not visible to the caller
    pub fn is_not_found(&self) -> bool {
        self.code().is_some_and(|c| NOT_FOUND_CODES.contains(&c)) || self.status() == Some(404)
    }

    /// Check if the call was rate limited
    pub fn is_throttled(&self) -> bool {
        self.code().is_some_and(|c| THROTTLING_CODES.contains(&c)) || self.status() == Some(429)
    }

    /// Check if the credentials or the signature were rejected
    pub fn is_auth(&self) -> bool {
        self.code().is_some_and(|c| AUTH_CODES.contains(&c)) || self.status() == Some(401)
    }

    /// Check if the resource is busy or in the wrong lifecycle state
    pub fn is_conflict(&self) -> bool {
        self.code().is_some_and(|c| CONFLICT_CODES.contains(&c)) || self.status() == Some(409)
    }

    /// A hint for resolving this error, if one is known
    pub fn suggestion(&self) -> Option<&'static str> {
        if self.is_auth() {
            Some("Check the tenancy, user and fingerprint match the API signing key.")
        } else if self.is_not_found() {
            Some("The resource may have been deleted, or the user lacks inspect permission on it.")
        } else if self.is_throttled() {
            Some("The service is rate limiting requests. Lower --max-concurrency and re-run.")
        } else if self.is_conflict() {
            Some("The resource is busy. Re-run the sweep once its work request completes.")
        } else {
            None
        }
    }
}

/// Failure to load API signing credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Missing credential field: {0}")]
    Missing(&'static str),

    #[error("Could not read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed PEM: {0}")]
    Pem(String),

    #[error("Key rejected: {0}")]
    KeyRejected(String),
}

/// Failure to derive a region-scoped client
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Malformed region identifier '{0}'")]
    Malformed(String),

    #[error("Invalid endpoint for region {region}: {reason}")]
    Endpoint { region: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: u16, code: Option<&str>) -> ApiError {
        ApiError::Service {
            status,
            code: code.map(str::to_string),
            message: "msg".to_string(),
            opc_request_id: None,
        }
    }

    #[test]
    fn not_found_codes() {
        for code in NOT_FOUND_CODES {
            assert!(service(404, Some(code)).is_not_found(), "{code}");
        }
        assert!(service(404, None).is_not_found());
    }

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            assert!(service(429, Some(code)).is_throttled(), "{code}");
        }
        assert!(!service(500, Some("InternalServerError")).is_throttled());
    }

    #[test]
    fn auth_and_conflict_codes() {
        assert!(service(401, Some("NotAuthenticated")).is_auth());
        assert!(service(409, Some("IncorrectState")).is_conflict());
        assert!(!service(409, Some("IncorrectState")).is_auth());
    }

    #[test]
    fn suggestions() {
        assert!(service(401, None).suggestion().is_some());
        assert!(service(429, None).suggestion().unwrap().contains("--max-concurrency"));
        assert_eq!(service(500, Some("InternalServerError")).suggestion(), None);
        assert_eq!(ApiError::Signing("x".into()).suggestion(), None);
    }

    #[test]
    fn display_includes_code() {
        let err = service(404, Some("NotAuthorizedOrNotFound"));
        assert_eq!(
            err.to_string(),
            "Service error 404 (NotAuthorizedOrNotFound): msg"
        );
        assert_eq!(
            service(502, None).to_string(),
            "Service error 502 (no code): msg"
        );
    }
}
