//! Per-resource correction: fetch, evaluate, update, verify
//!
//! Every failure is absorbed here and reported as an [`Outcome::Unchanged`]
//! with the reason; nothing is retried.

use super::capabilities::{Corrector, Detailer};
use super::types::{Outcome, ResourceSummary, UnchangedReason};
use license_sweep_common::{LicenseModel, LicenseState, LicenseUpdate, ResourceKind};
use tracing::{debug, error, info};

/// Decide whether a resource in `state` needs switching to BYOL.
///
/// Database systems and integration instances are already filtered by their
/// search query, so they only skip resources that are BYOL by now.
pub fn evaluate(kind: ResourceKind, state: &LicenseState) -> Result<(), UnchangedReason> {
    match kind {
        ResourceKind::AutonomousDatabase if state.free_tier => Err(UnchangedReason::FreeTier),
        ResourceKind::AutonomousDatabase | ResourceKind::AnalyticsInstance => {
            if state.model == LicenseModel::LicenseIncluded {
                Ok(())
            } else {
                Err(UnchangedReason::AlreadyCompliant)
            }
        }
        ResourceKind::DbSystem | ResourceKind::IntegrationInstance => {
            if state.model.is_byol() {
                Err(UnchangedReason::AlreadyCompliant)
            } else {
                Ok(())
            }
        }
    }
}

/// Run the correction for one resource against its region's client
pub async fn correct<C>(
    client: &C,
    kind: ResourceKind,
    summary: &ResourceSummary,
    dry_run: bool,
) -> Outcome
where
    C: Detailer + Corrector + ?Sized,
{
    let id = summary.identifier.as_str();

    let state = match client.license_state(kind, id).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = ?e, "Problem fetching resource detail");
            return Outcome::Unchanged(UnchangedReason::FetchFailed);
        }
    };

    if let Err(reason) = evaluate(kind, &state) {
        debug!(license = %state.model, free_tier = state.free_tier, %reason, "No correction needed");
        return Outcome::Unchanged(reason);
    }

    let update = LicenseUpdate::byol_for(kind);
    if dry_run {
        info!(license = %state.model, target = %update.model, "Dry run, would switch license");
        return Outcome::Unchanged(UnchangedReason::DryRun);
    }

    let expected = kind.expected_update_status();
    match client.update_license(kind, id, &update).await {
        Ok(status) if status.code == expected => {
            info!(status = status.code, "License switched to BYOL");
            Outcome::Changed
        }
        Ok(status) => {
            error!(status = status.code, expected, "Update answered with unexpected status");
            Outcome::Unchanged(UnchangedReason::UnexpectedStatus)
        }
        Err(e) => {
            error!(error = ?e, "Problem updating license");
            Outcome::Unchanged(UnchangedReason::UpdateFailed)
        }
    }
}
