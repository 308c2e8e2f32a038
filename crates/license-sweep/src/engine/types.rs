//! Types flowing through the sweep engine

use serde::{Deserialize, Serialize};

/// Lightweight discovery record returned by a structured search.
///
/// The region is implicit: summaries are always grouped under the region
/// that returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    /// Resource identifier used to fetch and update the resource
    pub identifier: String,
    /// Declared type tag, e.g. `AutonomousDatabase`
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_state: Option<String>,
}

impl ResourceSummary {
    pub fn new(identifier: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            resource_type: resource_type.into(),
            display_name: None,
            compartment_id: None,
            lifecycle_state: None,
        }
    }
}

/// Status reported by a corrective update call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationStatus {
    /// HTTP status code of the update response
    pub code: u16,
}

/// Why a handler left a resource untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UnchangedReason {
    /// Already bring-your-own-license (or not license-included)
    AlreadyCompliant,
    /// Free tier resources have no billable license mode
    FreeTier,
    /// Correction needed but mutations are disabled
    DryRun,
    /// Detail could not be fetched
    FetchFailed,
    /// Update call returned an error
    UpdateFailed,
    /// Update call answered with a status other than the expected one
    UnexpectedStatus,
}

impl UnchangedReason {
    /// Whether this outcome was caused by a failed call rather than a decision
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            UnchangedReason::FetchFailed
                | UnchangedReason::UpdateFailed
                | UnchangedReason::UnexpectedStatus
        )
    }
}

/// Terminal state of one resource's correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged(UnchangedReason),
}

impl Outcome {
    pub fn is_changed(self) -> bool {
        self == Outcome::Changed
    }
}
