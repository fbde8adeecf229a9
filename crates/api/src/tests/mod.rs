// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Test fixtures shared by the service-layer tests.

mod admin_tests;
mod authorization_tests;
mod batch_tests;
mod catalog_tests;
mod conflict_tests;

use crate::auth::{AuthenticatedPrincipal, AuthenticationService};
use crate::catalog;
use crate::request_response::{
    ApplicationResponse, CreateServiceRequest, RegisterRequest, ServiceResponse,
    SubmitApplicationRequest,
};
use gram_panchayat_domain::Role;
use gram_panchayat_persistence::Persistence;

pub(crate) const TEST_PASSWORD: &str = "Secure#Pass9999";

pub(crate) fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

/// Registers a citizen through the real registration path and returns
/// the acting principal.
pub(crate) fn register_citizen(
    persistence: &mut Persistence,
    email: &str,
) -> AuthenticatedPrincipal {
    let request = RegisterRequest {
        email: email.to_string(),
        display_name: "Asha Devi".to_string(),
        password: TEST_PASSWORD.to_string(),
        confirm_password: TEST_PASSWORD.to_string(),
    };
    let response =
        AuthenticationService::register(persistence, &request).expect("Failed to register citizen");
    AuthenticatedPrincipal::new(response.principal_id, Role::Citizen, "Asha Devi".to_string())
}

pub(crate) fn create_staff(persistence: &mut Persistence, email: &str) -> AuthenticatedPrincipal {
    let principal_id = persistence
        .create_principal(email, "Ravi Kumar", TEST_PASSWORD, Role::Staff)
        .expect("Failed to create staff principal");
    AuthenticatedPrincipal::new(principal_id, Role::Staff, "Ravi Kumar".to_string())
}

pub(crate) fn create_admin(persistence: &mut Persistence, email: &str) -> AuthenticatedPrincipal {
    let principal_id = persistence
        .create_principal(email, "Meena Joshi", TEST_PASSWORD, Role::Administrator)
        .expect("Failed to create administrator principal");
    AuthenticatedPrincipal::new(principal_id, Role::Administrator, "Meena Joshi".to_string())
}

/// Creates an active catalog service through the admin path.
pub(crate) fn create_test_service(
    persistence: &mut Persistence,
    admin: &AuthenticatedPrincipal,
    name: &str,
) -> ServiceResponse {
    let request = CreateServiceRequest {
        name: name.to_string(),
        category: "Certificates".to_string(),
        fee: 50,
        requirements: "Aadhaar card, address proof".to_string(),
    };
    catalog::create_service(persistence, admin, &request).expect("Failed to create service")
}

pub(crate) fn submit_test_application(
    persistence: &mut Persistence,
    citizen: &AuthenticatedPrincipal,
    service_id: i64,
) -> ApplicationResponse {
    let request = SubmitApplicationRequest {
        service_id,
        reason: "Needed for school admission".to_string(),
    };
    crate::applications::submit_application(persistence, citizen, &request)
        .expect("Failed to submit application")
}
