// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service catalog operations.
//!
//! Catalog writes are administrator-only. Services are never hard
//! deleted; deactivation stops new applications while leaving historical
//! snapshots resolvable.

use crate::activity::record_activity;
use crate::auth::AuthenticatedPrincipal;
use crate::error::ApiError;
use crate::request_response::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::roles::require_administrator;
use gram_panchayat_domain::validate_service_fields;
use gram_panchayat_persistence::{Persistence, ServiceRow};
use tracing::info;

fn load_service(
    persistence: &mut Persistence,
    service_id: i64,
) -> Result<ServiceRow, ApiError> {
    persistence
        .get_service(service_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Service"),
            message: format!("Service {service_id} not found"),
        })
}

fn to_response(row: ServiceRow) -> Result<ServiceResponse, ApiError> {
    Ok(ServiceResponse::from(row.into_descriptor()?))
}

/// Creates a new catalog service.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an
/// administrator, or `ApiError::InvalidInput` for empty fields.
pub fn create_service(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    request: &CreateServiceRequest,
) -> Result<ServiceResponse, ApiError> {
    require_administrator(actor, "create_service")?;
    validate_service_fields(&request.name, &request.category)?;

    let service_id: i64 = persistence.create_service(
        &request.name,
        &request.category,
        request.fee,
        &request.requirements,
    )?;

    record_activity(
        persistence,
        actor,
        "CreateService",
        Some(format!("'{}' in {}", request.name, request.category)),
        Some(service_id.to_string()),
    )?;

    info!(service_id, name = %request.name, "catalog service created");

    to_response(load_service(persistence, service_id)?)
}

/// Edits a catalog service. Absent fields keep their stored value.
///
/// Existing applications keep the name and fee they snapshotted at
/// submission time.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an
/// administrator, or `ApiError::ResourceNotFound` for an unknown service.
pub fn update_service(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    service_id: i64,
    request: &UpdateServiceRequest,
) -> Result<ServiceResponse, ApiError> {
    require_administrator(actor, "update_service")?;

    let current: ServiceRow = load_service(persistence, service_id)?;
    let current = current.into_descriptor()?;

    let name: &str = request.name.as_deref().unwrap_or(&current.name);
    let category: &str = request.category.as_deref().unwrap_or(&current.category);
    let fee: u32 = request.fee.unwrap_or(current.fee);
    let requirements: &str = request
        .requirements
        .as_deref()
        .unwrap_or(&current.requirements);

    validate_service_fields(name, category)?;

    persistence.update_service(service_id, name, category, fee, requirements)?;

    record_activity(
        persistence,
        actor,
        "UpdateService",
        Some(format!("'{name}'")),
        Some(service_id.to_string()),
    )?;

    to_response(load_service(persistence, service_id)?)
}

/// Deactivates a catalog service so it stops accepting applications.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` unless the actor is an
/// administrator, or `ApiError::ResourceNotFound` for an unknown service.
pub fn deactivate_service(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    service_id: i64,
) -> Result<ServiceResponse, ApiError> {
    require_administrator(actor, "deactivate_service")?;

    persistence.deactivate_service(service_id)?;

    record_activity(
        persistence,
        actor,
        "DeactivateService",
        None,
        Some(service_id.to_string()),
    )?;

    info!(service_id, "catalog service deactivated");

    to_response(load_service(persistence, service_id)?)
}

/// Looks up one catalog service, active or not.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown service.
pub fn get_service(
    persistence: &mut Persistence,
    service_id: i64,
) -> Result<ServiceResponse, ApiError> {
    to_response(load_service(persistence, service_id)?)
}

/// Lists catalog services, optionally narrowed to one category.
///
/// Inactive services appear only when the caller is staff or an
/// administrator and asks for them.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_services(
    persistence: &mut Persistence,
    actor: Option<&AuthenticatedPrincipal>,
    category: Option<&str>,
    include_inactive: bool,
) -> Result<Vec<ServiceResponse>, ApiError> {
    let include_inactive: bool =
        include_inactive && actor.is_some_and(|a| a.role.is_adjudicator());

    let rows = persistence.list_services(category, include_inactive)?;
    let mut responses: Vec<ServiceResponse> = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(row)?);
    }
    Ok(responses)
}

/// Searches active services by case-insensitive substring across name,
/// category, and requirements.
///
/// # Errors
///
/// Returns an error if the search fails.
pub fn search_services(
    persistence: &mut Persistence,
    term: &str,
) -> Result<Vec<ServiceResponse>, ApiError> {
    let rows = persistence.search_services(term)?;
    let mut responses: Vec<ServiceResponse> = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(row)?);
    }
    Ok(responses)
}
