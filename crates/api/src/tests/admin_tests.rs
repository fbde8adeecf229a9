// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_admin, create_staff, create_test_service, register_citizen, submit_test_application, test_persistence};
use crate::admin::{assign_role, citizen_stats, dashboard_stats, delete_user, list_activity};
use crate::applications::transition_application;
use crate::error::ApiError;
use gram_panchayat_domain::{ApplicationStatus, Role};

#[test]
fn assign_role_elevates_a_citizen_to_staff() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");

    assign_role(&mut p, &admin, citizen.id, Role::Staff).expect("Assignment should succeed");

    let stored = p
        .get_role_assignment(citizen.id)
        .expect("Query should run")
        .expect("Assignment should exist");
    assert_eq!(stored, "staff");
}

#[test]
fn staff_cannot_assign_roles() {
    let mut p = test_persistence();
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");

    let result = assign_role(&mut p, &staff, citizen.id, Role::Staff);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn assigning_a_role_to_an_unknown_principal_is_not_found() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");

    let result = assign_role(&mut p, &admin, 9999, Role::Staff);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn admin_deletion_cascades_applications_and_sessions() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let first = create_test_service(&mut p, &admin, "Birth Certificate");
    let second = create_test_service(&mut p, &admin, "Trade License");
    submit_test_application(&mut p, &citizen, first.id);
    submit_test_application(&mut p, &citizen, second.id);

    let outcome = delete_user(&mut p, &admin, citizen.id).expect("Deletion should succeed");
    assert_eq!(outcome.principal_id, citizen.id);
    assert_eq!(outcome.applications_removed, 2);

    assert!(
        !p.principal_exists(citizen.id).expect("Query should run"),
        "principal should be gone"
    );
}

#[test]
fn citizens_may_delete_only_themselves() {
    let mut p = test_persistence();
    let owner = register_citizen(&mut p, "asha@village.test");
    let other = register_citizen(&mut p, "binod@village.test");

    let denied = delete_user(&mut p, &other, owner.id);
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let outcome = delete_user(&mut p, &owner, owner.id).expect("Self-deletion should succeed");
    assert_eq!(outcome.applications_removed, 0);
}

#[test]
fn deleting_an_unknown_principal_is_not_found() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");

    let result = delete_user(&mut p, &admin, 9999);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn dashboard_counts_citizens_services_and_statuses() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    register_citizen(&mut p, "binod@village.test");
    let first = create_test_service(&mut p, &admin, "Birth Certificate");
    let second = create_test_service(&mut p, &admin, "Trade License");
    crate::catalog::deactivate_service(&mut p, &admin, second.id)
        .expect("Deactivation should succeed");

    let application = submit_test_application(&mut p, &citizen, first.id);
    transition_application(&mut p, &staff, application.id, ApplicationStatus::Processing, None)
        .expect("Transition should succeed");

    let stats = dashboard_stats(&mut p, &staff).expect("Stats should compute");
    assert_eq!(stats.total_citizens, 2);
    assert_eq!(stats.active_services, 1);
    assert_eq!(stats.applications_today, 1);
    assert_eq!(stats.applications_by_status.len(), 1);
    assert_eq!(stats.applications_by_status[0].status, "processing");
    assert_eq!(stats.applications_by_status[0].count, 1);
}

#[test]
fn citizens_cannot_read_the_dashboard() {
    let mut p = test_persistence();
    let citizen = register_citizen(&mut p, "asha@village.test");

    let result = dashboard_stats(&mut p, &citizen);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn citizen_stats_partition_their_own_applications() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let first = create_test_service(&mut p, &admin, "Birth Certificate");
    let second = create_test_service(&mut p, &admin, "Trade License");
    let third = create_test_service(&mut p, &admin, "Water Connection");

    let approved = submit_test_application(&mut p, &citizen, first.id);
    transition_application(&mut p, &staff, approved.id, ApplicationStatus::Processing, None)
        .expect("Transition should succeed");
    transition_application(&mut p, &staff, approved.id, ApplicationStatus::Approved, None)
        .expect("Transition should succeed");

    let cancelled = submit_test_application(&mut p, &citizen, second.id);
    crate::applications::cancel_application(&mut p, &citizen, cancelled.id)
        .expect("Cancellation should succeed");

    submit_test_application(&mut p, &citizen, third.id);

    let stats = citizen_stats(&mut p, &citizen).expect("Stats should compute");
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.processing, 0);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.rejected, 0);
    assert_eq!(stats.cancelled, 1);
}

#[test]
fn citizen_stats_exclude_other_citizens() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let owner = register_citizen(&mut p, "asha@village.test");
    let other = register_citizen(&mut p, "binod@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    submit_test_application(&mut p, &owner, service.id);

    let stats = citizen_stats(&mut p, &other).expect("Stats should compute");
    assert_eq!(stats.total, 0);
}

#[test]
fn activity_log_records_portal_actions_newest_first() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    submit_test_application(&mut p, &citizen, service.id);

    let events = list_activity(&mut p, &admin, 10).expect("Listing should succeed");
    // RegisterCitizen, CreateService, SubmitApplication
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].action, "SubmitApplication");
    assert_eq!(events[0].actor_id, citizen.id);
    assert_eq!(events[0].actor_role, "citizen");
    assert!(events[0].target.is_some());
}

#[test]
fn activity_log_honors_the_limit() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    register_citizen(&mut p, "asha@village.test");
    create_test_service(&mut p, &admin, "Birth Certificate");

    let events = list_activity(&mut p, &admin, 1).expect("Listing should succeed");
    assert_eq!(events.len(), 1);
}

#[test]
fn staff_cannot_read_the_activity_log() {
    let mut p = test_persistence();
    let staff = create_staff(&mut p, "staff@panchayat.test");

    let result = list_activity(&mut p, &staff, 10);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
