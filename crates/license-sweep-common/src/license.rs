//! License modes and the corrective update payload

use crate::ResourceKind;
use serde::{Deserialize, Serialize};

/// License mode reported by a resource.
///
/// Serialized with the service's wire names (`LICENSE_INCLUDED`,
/// `BRING_YOUR_OWN_LICENSE`). Values the sweep does not know about
/// deserialize to [`LicenseModel::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseModel {
    /// License cost bundled into the resource price
    LicenseIncluded,
    /// Customer-supplied license
    BringYourOwnLicense,
    /// Missing or unrecognized value
    #[default]
    #[serde(other)]
    Unknown,
}

impl LicenseModel {
    /// Map the integration service's boolean flag onto a license mode
    pub fn from_byol_flag(is_byol: bool) -> Self {
        if is_byol {
            LicenseModel::BringYourOwnLicense
        } else {
            LicenseModel::LicenseIncluded
        }
    }

    pub fn is_byol(self) -> bool {
        self == LicenseModel::BringYourOwnLicense
    }
}

/// Autonomous database edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseEdition {
    StandardEdition,
    EnterpriseEdition,
}

/// Current license state of a resource, as read from its detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LicenseState {
    /// Reported license mode
    pub model: LicenseModel,
    /// Free tier resources carry no billable license mode
    pub free_tier: bool,
}

impl LicenseState {
    pub fn new(model: LicenseModel) -> Self {
        Self {
            model,
            free_tier: false,
        }
    }

    pub fn free_tier(model: LicenseModel) -> Self {
        Self {
            model,
            free_tier: true,
        }
    }
}

/// Corrective update applied to a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseUpdate {
    /// License mode to switch to
    pub model: LicenseModel,
    /// Edition to pin alongside the license change, where the family requires one
    pub database_edition: Option<DatabaseEdition>,
}

impl LicenseUpdate {
    /// The bring-your-own-license update for a resource family.
    ///
    /// Autonomous databases only accept a BYOL license together with an
    /// explicit enterprise edition.
    pub fn byol_for(kind: ResourceKind) -> Self {
        let database_edition = match kind {
            ResourceKind::AutonomousDatabase => Some(DatabaseEdition::EnterpriseEdition),
            ResourceKind::DbSystem
            | ResourceKind::AnalyticsInstance
            | ResourceKind::IntegrationInstance => None,
        };
        Self {
            model: LicenseModel::BringYourOwnLicense,
            database_edition,
        }
    }
}
