// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role resolution and authorization guards.
//!
//! A principal's role comes from the `role_assignments` table. A principal
//! that exists but has no assignment resolves to citizen; this keeps the
//! portal usable for accounts created before role records existed. An
//! unknown principal is an error, never a default.

use crate::auth::AuthenticatedPrincipal;
use crate::error::ApiError;
use gram_panchayat_domain::Role;
use gram_panchayat_persistence::Persistence;
use std::str::FromStr;

/// Resolves the role of a known principal.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the principal does not exist,
/// or `ApiError::Internal` if a stored role string is unrecognized.
pub fn resolve_role(
    persistence: &mut Persistence,
    principal_id: i64,
) -> Result<Role, ApiError> {
    if !persistence.principal_exists(principal_id)? {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Principal"),
            message: format!("Principal {principal_id} not found"),
        });
    }

    match persistence.get_role_assignment(principal_id)? {
        Some(tag) => Role::from_str(&tag).map_err(|_| ApiError::Internal {
            message: format!("Corrupt role assignment '{tag}' for principal {principal_id}"),
        }),
        // No assignment recorded: the principal is a citizen
        None => Ok(Role::Citizen),
    }
}

/// Requires the actor to be staff or an administrator.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` otherwise.
pub fn require_adjudicator(
    actor: &AuthenticatedPrincipal,
    action: &str,
) -> Result<(), ApiError> {
    if actor.role.is_adjudicator() {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: String::from(action),
            required_role: String::from("staff"),
        })
    }
}

/// Requires the actor to be an administrator.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` otherwise.
pub fn require_administrator(
    actor: &AuthenticatedPrincipal,
    action: &str,
) -> Result<(), ApiError> {
    match actor.role {
        Role::Administrator => Ok(()),
        Role::Citizen | Role::Staff => Err(ApiError::Unauthorized {
            action: String::from(action),
            required_role: String::from("administrator"),
        }),
    }
}
