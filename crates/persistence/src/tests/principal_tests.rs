// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_citizen, create_test_service, submit_test_application, test_persistence};
use crate::{ApplicationFilter, PersistenceError, verify_password};
use gram_panchayat_domain::Role;

#[test]
fn test_create_principal_hashes_password() {
    let mut persistence = test_persistence();
    let id = create_test_citizen(&mut persistence, "asha@village.gov.in");

    let principal = persistence
        .get_principal_by_id(id)
        .expect("lookup should succeed")
        .expect("principal should exist");

    assert_ne!(principal.password_hash, "Secure#Pass9999");
    assert!(verify_password("Secure#Pass9999", &principal.password_hash)
        .expect("verification should run"));
    assert!(!verify_password("wrong-password", &principal.password_hash)
        .expect("verification should run"));
}

#[test]
fn test_duplicate_email_rejected() {
    let mut persistence = test_persistence();
    create_test_citizen(&mut persistence, "asha@village.gov.in");

    let result = persistence.create_principal(
        "asha@village.gov.in",
        "Another Asha",
        "Other#Password99",
        Role::Citizen,
    );
    assert_eq!(
        result.err(),
        Some(PersistenceError::DuplicateEmail(String::from(
            "asha@village.gov.in"
        )))
    );
}

#[test]
fn test_role_assignment_round_trip() {
    let mut persistence = test_persistence();
    let id = create_test_citizen(&mut persistence, "staff@panchayat.gov.in");

    assert_eq!(
        persistence
            .get_role_assignment(id)
            .expect("lookup should succeed")
            .as_deref(),
        Some("citizen")
    );

    persistence
        .set_role_assignment(id, Role::Staff)
        .expect("assignment should succeed");
    assert_eq!(
        persistence
            .get_role_assignment(id)
            .expect("lookup should succeed")
            .as_deref(),
        Some("staff")
    );
}

#[test]
fn test_clear_role_assignment_leaves_no_row() {
    let mut persistence = test_persistence();
    let id = create_test_citizen(&mut persistence, "staff@panchayat.gov.in");
    persistence
        .set_role_assignment(id, Role::Staff)
        .expect("assignment should succeed");

    persistence
        .clear_role_assignment(id)
        .expect("clearing should succeed");
    assert!(persistence
        .get_role_assignment(id)
        .expect("lookup should succeed")
        .is_none());
}

#[test]
fn test_role_assignment_requires_existing_principal() {
    let mut persistence = test_persistence();
    let result = persistence.set_role_assignment(999, Role::Staff);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_principal_cascade_removes_everything() {
    let mut persistence = test_persistence();
    let id = create_test_citizen(&mut persistence, "asha@village.gov.in");
    let service = create_test_service(&mut persistence, "Birth Certificate");
    submit_test_application(&mut persistence, id, &service);
    persistence
        .create_session(
            "token-abc",
            id,
            "2026-03-05T10:00:00Z",
            "2026-04-04T10:00:00Z",
        )
        .expect("session creation should succeed");

    let removed = persistence
        .delete_principal_cascade(id)
        .expect("cascade should succeed");
    assert_eq!(removed, 1);

    assert!(persistence
        .get_principal_by_id(id)
        .expect("lookup should succeed")
        .is_none());
    assert!(persistence
        .get_session_by_token("token-abc")
        .expect("lookup should succeed")
        .is_none());
    assert!(persistence
        .get_role_assignment(id)
        .expect("lookup should succeed")
        .is_none());
    assert!(persistence
        .list_applications(&ApplicationFilter {
            citizen_id: Some(id),
            ..ApplicationFilter::default()
        })
        .expect("listing should succeed")
        .is_empty());
}

#[test]
fn test_delete_unknown_principal_is_not_found() {
    let mut persistence = test_persistence();
    let result = persistence.delete_principal_cascade(42);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_count_citizens_ignores_elevated_roles() {
    let mut persistence = test_persistence();
    create_test_citizen(&mut persistence, "one@village.gov.in");
    create_test_citizen(&mut persistence, "two@village.gov.in");
    let staff = create_test_citizen(&mut persistence, "staff@panchayat.gov.in");
    persistence
        .set_role_assignment(staff, Role::Staff)
        .expect("assignment should succeed");

    assert_eq!(
        persistence.count_citizens().expect("count should succeed"),
        2
    );
}
