// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_admin, create_staff, create_test_service, register_citizen, submit_test_application, test_persistence};
use crate::catalog::{
    create_service, deactivate_service, get_service, list_services, search_services,
    update_service,
};
use crate::error::ApiError;
use crate::request_response::{CreateServiceRequest, UpdateServiceRequest};

#[test]
fn created_service_is_active_and_readable() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");

    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    assert!(service.is_active);
    assert_eq!(service.fee, 50);

    let fetched = get_service(&mut p, service.id).expect("Service should exist");
    assert_eq!(fetched, service);
}

#[test]
fn staff_cannot_create_services() {
    let mut p = test_persistence();
    let staff = create_staff(&mut p, "staff@panchayat.test");

    let request = CreateServiceRequest {
        name: "Birth Certificate".to_string(),
        category: "Certificates".to_string(),
        fee: 50,
        requirements: String::new(),
    };
    let result = create_service(&mut p, &staff, &request);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn blank_service_name_is_rejected() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");

    let request = CreateServiceRequest {
        name: "   ".to_string(),
        category: "Certificates".to_string(),
        fee: 50,
        requirements: String::new(),
    };
    let result = create_service(&mut p, &admin, &request);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn partial_update_keeps_omitted_fields() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");

    let updated = update_service(
        &mut p,
        &admin,
        service.id,
        &UpdateServiceRequest {
            fee: Some(75),
            ..UpdateServiceRequest::default()
        },
    )
    .expect("Update should succeed");

    assert_eq!(updated.fee, 75);
    assert_eq!(updated.name, "Birth Certificate");
    assert_eq!(updated.category, "Certificates");
    assert_eq!(updated.requirements, "Aadhaar card, address proof");
}

#[test]
fn update_of_unknown_service_is_not_found() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");

    let result = update_service(&mut p, &admin, 9999, &UpdateServiceRequest::default());
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn deactivated_service_disappears_from_public_listing() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let kept = create_test_service(&mut p, &admin, "Birth Certificate");
    let retired = create_test_service(&mut p, &admin, "Trade License");

    deactivate_service(&mut p, &admin, retired.id).expect("Deactivation should succeed");

    let public = list_services(&mut p, None, None, false).expect("Listing should succeed");
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, kept.id);

    // Staff asking for inactive entries still see everything
    let full = list_services(&mut p, Some(&admin), None, true).expect("Listing should succeed");
    assert_eq!(full.len(), 2);
}

#[test]
fn citizens_never_see_inactive_services_even_when_asked_for() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    deactivate_service(&mut p, &admin, service.id).expect("Deactivation should succeed");

    let listed =
        list_services(&mut p, Some(&citizen), None, true).expect("Listing should succeed");
    assert!(listed.is_empty());
}

#[test]
fn listing_filters_by_category() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    create_test_service(&mut p, &admin, "Birth Certificate");

    let request = CreateServiceRequest {
        name: "Street Light Repair".to_string(),
        category: "Infrastructure".to_string(),
        fee: 0,
        requirements: String::new(),
    };
    create_service(&mut p, &admin, &request).expect("Create should succeed");

    let certificates = list_services(&mut p, None, Some("Certificates"), false)
        .expect("Listing should succeed");
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0].name, "Birth Certificate");
}

#[test]
fn search_matches_name_category_and_requirements() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    create_test_service(&mut p, &admin, "Birth Certificate");

    let by_name = search_services(&mut p, "birth").expect("Search should succeed");
    assert_eq!(by_name.len(), 1);

    let by_requirements = search_services(&mut p, "aadhaar").expect("Search should succeed");
    assert_eq!(by_requirements.len(), 1);

    let no_match = search_services(&mut p, "pension").expect("Search should succeed");
    assert!(no_match.is_empty());
}

#[test]
fn catalog_edits_never_touch_submitted_snapshots() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    let application = submit_test_application(&mut p, &citizen, service.id);

    update_service(
        &mut p,
        &admin,
        service.id,
        &UpdateServiceRequest {
            name: Some("Birth Certificate (Revised)".to_string()),
            fee: Some(200),
            ..UpdateServiceRequest::default()
        },
    )
    .expect("Update should succeed");

    let fetched = crate::applications::get_application(&mut p, &admin, application.id)
        .expect("Fetch should succeed");
    assert_eq!(fetched.service_name, "Birth Certificate");
    assert_eq!(fetched.fee, 50);
}
