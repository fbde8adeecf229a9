// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative operations: role assignment, account removal,
//! dashboards, and the activity log.

use crate::activity::record_activity;
use crate::auth::AuthenticatedPrincipal;
use crate::error::ApiError;
use crate::request_response::{
    ActivityEventResponse, CitizenStatsResponse, DashboardStatsResponse, DeleteUserResponse,
    StatusCount,
};
use crate::roles::{require_adjudicator, require_administrator};
use gram_panchayat_domain::{ApplicationStatus, Role};
use gram_panchayat_persistence::Persistence;
use time::OffsetDateTime;
use tracing::info;

/// Assigns a role to a principal, replacing any previous assignment.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an
/// administrator, or `ApiError::ResourceNotFound` for an unknown
/// principal.
pub fn assign_role(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    principal_id: i64,
    role: Role,
) -> Result<(), ApiError> {
    require_administrator(actor, "assign_role")?;

    persistence.set_role_assignment(principal_id, role)?;

    record_activity(
        persistence,
        actor,
        "AssignRole",
        Some(format!("role '{}'", role.as_str())),
        Some(principal_id.to_string()),
    )?;

    info!(principal_id, role = role.as_str(), "role assigned");
    Ok(())
}

/// Deletes an account and everything that hangs off it: applications,
/// sessions, and the role assignment, all in one transaction.
///
/// Administrators may delete any account; everyone else may delete only
/// their own.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for someone else's account, or
/// `ApiError::ResourceNotFound` for an unknown principal.
pub fn delete_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    principal_id: i64,
) -> Result<DeleteUserResponse, ApiError> {
    if actor.id != principal_id {
        require_administrator(actor, "delete_user")?;
    }

    let applications_removed: usize = persistence.delete_principal_cascade(principal_id)?;

    record_activity(
        persistence,
        actor,
        "DeleteUser",
        Some(format!("{applications_removed} application(s) removed")),
        Some(principal_id.to_string()),
    )?;

    info!(principal_id, applications_removed, "account deleted");

    Ok(DeleteUserResponse {
        principal_id,
        applications_removed,
    })
}

/// Portal-wide statistics for the staff dashboard.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is staff or an
/// administrator.
pub fn dashboard_stats(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
) -> Result<DashboardStatsResponse, ApiError> {
    require_adjudicator(actor, "dashboard_stats")?;

    let today = OffsetDateTime::now_utc().date();
    // Midnight prefix compares lexicographically against ISO 8601 timestamps
    let midnight: String = format!(
        "{:04}-{:02}-{:02}T00:00:00",
        today.year(),
        u8::from(today.month()),
        today.day()
    );

    let applications_by_status: Vec<StatusCount> = persistence
        .count_applications_by_status()?
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();

    Ok(DashboardStatsResponse {
        total_citizens: persistence.count_citizens()?,
        active_services: persistence.count_active_services()?,
        applications_by_status,
        applications_today: persistence.count_applications_since(&midnight)?,
    })
}

/// The acting principal's own application statistics.
///
/// # Errors
///
/// Returns an error if the counts fail.
pub fn citizen_stats(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
) -> Result<CitizenStatsResponse, ApiError> {
    let counts = persistence.count_citizen_applications_by_status(actor.id)?;

    let mut stats = CitizenStatsResponse {
        total: 0,
        pending: 0,
        processing: 0,
        approved: 0,
        rejected: 0,
        cancelled: 0,
    };

    for (status, count) in counts {
        stats.total += count;
        match status.parse::<ApplicationStatus>() {
            Ok(ApplicationStatus::Pending) => stats.pending = count,
            Ok(ApplicationStatus::Processing) => stats.processing = count,
            Ok(ApplicationStatus::Approved) => stats.approved = count,
            Ok(ApplicationStatus::Rejected) => stats.rejected = count,
            Ok(ApplicationStatus::Cancelled) => stats.cancelled = count,
            Err(_) => {
                return Err(ApiError::Internal {
                    message: format!("Corrupt status '{status}' in statistics"),
                });
            }
        }
    }

    Ok(stats)
}

/// Lists the most recent activity events, newest first.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an administrator.
pub fn list_activity(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    limit: i64,
) -> Result<Vec<ActivityEventResponse>, ApiError> {
    require_administrator(actor, "list_activity")?;

    let rows = persistence.list_activity(limit)?;
    let mut responses: Vec<ActivityEventResponse> = Vec::with_capacity(rows.len());
    for row in rows {
        let (event_id, event) = row.into_event()?;
        responses.push(ActivityEventResponse {
            event_id,
            actor_id: event.actor.id,
            actor_role: event.actor.role.as_str().to_string(),
            action: event.action.name,
            details: event.action.details,
            target: event.target,
            recorded_at: event.recorded_at,
        });
    }
    Ok(responses)
}
