//! Resource families handled by the sweep
//!
//! Each family is identified in search results by a type tag and has its own
//! success status code for the corrective update.

/// Resource families with a correctable license mode
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum ResourceKind {
    /// Bare metal / virtual machine database system
    DbSystem,
    /// Autonomous database (may be free tier)
    AutonomousDatabase,
    /// Analytics cloud instance
    AnalyticsInstance,
    /// Integration cloud instance
    IntegrationInstance,
}

impl ResourceKind {
    /// Every supported family, in dispatch-table order
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::DbSystem,
        ResourceKind::AutonomousDatabase,
        ResourceKind::AnalyticsInstance,
        ResourceKind::IntegrationInstance,
    ];

    /// Classify a search result type tag. Tags are matched exactly.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }

    /// The type tag search results use for this family
    pub fn type_tag(self) -> &'static str {
        self.into()
    }

    /// HTTP status the update call reports on success.
    ///
    /// Integration instance updates are asynchronous and answer `202 Accepted`;
    /// the other families answer `200 OK`.
    pub fn expected_update_status(self) -> u16 {
        match self {
            ResourceKind::IntegrationInstance => 202,
            ResourceKind::DbSystem
            | ResourceKind::AutonomousDatabase
            | ResourceKind::AnalyticsInstance => 200,
        }
    }
}
