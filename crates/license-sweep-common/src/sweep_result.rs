//! Result envelope returned by one sweep invocation
//!
//! Empty and zero fields are omitted when serialized, so a fatal startup
//! failure serializes to `{"error": "..."}` alone.

use serde::{Deserialize, Serialize};

/// Outcome of a sweep invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResult {
    /// Completion message, set once the sweep has finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Fatal startup error; never set together with `message`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Resources examined across all regions
    #[serde(default, skip_serializing_if = "is_zero")]
    pub items_found: u64,
    /// Resources whose license mode was actually changed
    #[serde(default, skip_serializing_if = "is_zero")]
    pub license_changes: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl SweepResult {
    /// A finished sweep
    pub fn completed(message: impl Into<String>, items_found: u64, license_changes: u64) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
            items_found,
            license_changes,
        }
    }

    /// A sweep that could not start; carries no counts
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Whether the sweep ran to completion
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.message.is_some()
    }

    /// Serialize to the JSON response body
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_serialization() {
        let result = SweepResult::completed("done", 2, 1);
        let json = result.to_json().unwrap();
        assert!(json.contains("\"message\":\"done\""));
        assert!(json.contains("\"items_found\":2"));
        assert!(json.contains("\"license_changes\":1"));
        assert!(!json.contains("error"));
        assert!(result.is_success());
    }

    #[test]
    fn test_zero_counts_are_omitted() {
        let json = SweepResult::completed("done", 0, 0).to_json().unwrap();
        assert_eq!(json, r#"{"message":"done"}"#);
    }

    #[test]
    fn test_failed_serialization() {
        let result = SweepResult::failed("Error getting regions subscription: boom");
        assert_eq!(
            result.to_json().unwrap(),
            r#"{"error":"Error getting regions subscription: boom"}"#
        );
        assert!(!result.is_success());
        assert_eq!(result.items_found, 0);
        assert_eq!(result.license_changes, 0);
    }

    #[test]
    fn test_deserialize_sparse_envelope() {
        let parsed: SweepResult = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(parsed, SweepResult::completed("ok", 0, 0));
    }
}
