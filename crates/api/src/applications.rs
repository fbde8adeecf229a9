// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application lifecycle operations.
//!
//! The transition path re-reads the application, checks authorization and
//! the lifecycle rules against the status it just read, then issues a
//! conditional update keyed on that same status. A concurrent writer
//! between the read and the update surfaces as `ApiError::Conflict`, and
//! exactly one of two racing writers wins.

use crate::activity::record_activity;
use crate::auth::AuthenticatedPrincipal;
use crate::error::ApiError;
use crate::request_response::{
    ApplicationResponse, BatchFailure, BatchTransitionOutcome, ListApplicationsParams,
    SubmitApplicationRequest,
};
use crate::roles::require_adjudicator;
use gram_panchayat_domain::{
    Application, ApplicationStatus, CANCELLED_BY_CITIZEN_REMARKS, Role, validate_reason,
};
use gram_panchayat_persistence::{ApplicationFilter, Persistence, ServiceRow};
use tracing::info;

fn load_application(
    persistence: &mut Persistence,
    application_id: i64,
) -> Result<Application, ApiError> {
    persistence
        .get_application(application_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!("Application {application_id} not found"),
        })?
        .into_application()
        .map_err(ApiError::from)
}

/// Submits a new application on the acting citizen's own behalf.
///
/// The service's name and fee are snapshotted onto the application.
///
/// # Errors
///
/// Returns an error if the actor is not a citizen, the reason is empty,
/// the service is unknown or inactive, or the citizen already has an
/// open application for the service.
pub fn submit_application(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    request: &SubmitApplicationRequest,
) -> Result<ApplicationResponse, ApiError> {
    // Applications are always submitted by the citizen themselves
    if actor.role != Role::Citizen {
        return Err(ApiError::Unauthorized {
            action: String::from("submit_application"),
            required_role: String::from("citizen"),
        });
    }

    validate_reason(&request.reason)?;

    let service: ServiceRow = persistence
        .get_service(request.service_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Service"),
            message: format!("Service {} not found", request.service_id),
        })?;

    if service.is_active == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("service_id"),
            message: format!("Service '{}' is not accepting applications", service.name),
        });
    }

    let row = persistence.create_application(actor.id, &service, &request.reason)?;
    let application: Application = row.into_application()?;

    record_activity(
        persistence,
        actor,
        "SubmitApplication",
        Some(format!("service '{}'", application.service_name)),
        Some(application.application_number.to_string()),
    )?;

    info!(
        application_number = %application.application_number,
        citizen_id = actor.id,
        "application submitted"
    );

    Ok(ApplicationResponse::from(application))
}

/// Looks up one application.
///
/// Citizens may only read their own applications; staff and
/// administrators may read any.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the application does not
/// exist, or `ApiError::Unauthorized` for someone else's application.
pub fn get_application(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    application_id: i64,
) -> Result<ApplicationResponse, ApiError> {
    let application: Application = load_application(persistence, application_id)?;

    if actor.role == Role::Citizen && application.citizen_id != actor.id {
        return Err(ApiError::Unauthorized {
            action: String::from("get_application"),
            required_role: String::from("staff"),
        });
    }

    Ok(ApplicationResponse::from(application))
}

/// Lists applications, newest first.
///
/// Citizens always see only their own applications regardless of the
/// requested filter; staff and administrators may filter freely.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_applications(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    params: &ListApplicationsParams,
) -> Result<Vec<ApplicationResponse>, ApiError> {
    let citizen_id: Option<i64> = if actor.role == Role::Citizen {
        Some(actor.id)
    } else {
        params.citizen_id
    };

    let statuses: Option<Vec<String>> = if params.statuses.is_empty() {
        None
    } else {
        Some(
            params
                .statuses
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        )
    };

    let filter = ApplicationFilter {
        citizen_id,
        service_id: params.service_id,
        statuses,
    };

    let rows = persistence.list_applications(&filter)?;
    let mut responses: Vec<ApplicationResponse> = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(ApplicationResponse::from(row.into_application()?));
    }
    Ok(responses)
}

fn authorize_transition(
    actor: &AuthenticatedPrincipal,
    application: &Application,
    new_status: ApplicationStatus,
) -> Result<(), ApiError> {
    match new_status {
        // Cancellation belongs to the applicant alone
        ApplicationStatus::Cancelled => {
            if actor.role == Role::Citizen && actor.id == application.citizen_id {
                Ok(())
            } else {
                Err(ApiError::Unauthorized {
                    action: String::from("cancel_application"),
                    required_role: String::from("owning citizen"),
                })
            }
        }
        ApplicationStatus::Pending
        | ApplicationStatus::Processing
        | ApplicationStatus::Approved
        | ApplicationStatus::Rejected => {
            require_adjudicator(actor, "update_application_status")
        }
    }
}

fn apply_transition(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    application: &Application,
    new_status: ApplicationStatus,
    remarks: Option<&str>,
) -> Result<ApplicationResponse, ApiError> {
    authorize_transition(actor, application, new_status)?;
    application.status.validate_transition(new_status)?;

    // Citizen cancellations get default remarks unless they supplied some
    let remarks: Option<&str> = match (new_status, remarks) {
        (ApplicationStatus::Cancelled, None) => Some(CANCELLED_BY_CITIZEN_REMARKS),
        (_, remarks) => remarks,
    };

    let updated: usize = persistence.update_application_status(
        application.id,
        application.status,
        new_status,
        remarks,
    )?;

    if updated == 0 {
        return Err(ApiError::Conflict {
            message: format!(
                "Application {} was changed concurrently; re-read and retry",
                application.application_number
            ),
        });
    }

    record_activity(
        persistence,
        actor,
        "UpdateApplicationStatus",
        Some(format!(
            "{} -> {}",
            application.status.as_str(),
            new_status.as_str()
        )),
        Some(application.application_number.to_string()),
    )?;

    info!(
        application_number = %application.application_number,
        from = application.status.as_str(),
        to = new_status.as_str(),
        actor_id = actor.id,
        "application status changed"
    );

    load_application(persistence, application.id).map(ApplicationResponse::from)
}

/// Moves one application to a new status.
///
/// Staff and administrators advance applications
/// (`pending -> processing -> approved/rejected`); the owning citizen may
/// cancel while still pending.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown application,
/// `ApiError::Unauthorized` when the actor's role does not permit the
/// change, `ApiError::InvalidTransition` when the lifecycle forbids it,
/// and `ApiError::Conflict` when a concurrent writer got there first.
pub fn transition_application(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    application_id: i64,
    new_status: ApplicationStatus,
    remarks: Option<&str>,
) -> Result<ApplicationResponse, ApiError> {
    let application: Application = load_application(persistence, application_id)?;
    apply_transition(persistence, actor, &application, new_status, remarks)
}

/// Cancels the acting citizen's own pending application.
///
/// # Errors
///
/// Same as [`transition_application`] with a `cancelled` target.
pub fn cancel_application(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    application_id: i64,
) -> Result<ApplicationResponse, ApiError> {
    transition_application(
        persistence,
        actor,
        application_id,
        ApplicationStatus::Cancelled,
        None,
    )
}

/// Applies one status change to many applications, best-effort.
///
/// Each application is processed independently; a failure is recorded in
/// the outcome and never rolls back or halts the rest.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the actor may not adjudicate at
/// all; per-application failures are reported in the outcome instead.
pub fn batch_transition(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    application_ids: &[i64],
    new_status: ApplicationStatus,
    remarks: Option<&str>,
) -> Result<BatchTransitionOutcome, ApiError> {
    require_adjudicator(actor, "batch_transition")?;

    let mut outcome = BatchTransitionOutcome {
        succeeded: Vec::new(),
        failed: Vec::new(),
    };

    for &application_id in application_ids {
        match transition_application(persistence, actor, application_id, new_status, remarks) {
            Ok(_) => outcome.succeeded.push(application_id),
            Err(e) => outcome.failed.push(BatchFailure {
                application_id,
                error: e.to_string(),
            }),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
pub(crate) fn apply_transition_with_stale_read(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    application: &Application,
    new_status: ApplicationStatus,
) -> Result<ApplicationResponse, ApiError> {
    apply_transition(persistence, actor, application, new_status, None)
}
