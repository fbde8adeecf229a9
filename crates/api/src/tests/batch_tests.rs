// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_admin, create_staff, create_test_service, register_citizen, submit_test_application, test_persistence};
use crate::applications::{batch_transition, transition_application};
use crate::error::ApiError;
use gram_panchayat_domain::ApplicationStatus;

#[test]
fn batch_moves_every_pending_application() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");

    let mut ids: Vec<i64> = Vec::new();
    for name in ["Birth Certificate", "Trade License", "Water Connection"] {
        let service = create_test_service(&mut p, &admin, name);
        ids.push(submit_test_application(&mut p, &citizen, service.id).id);
    }

    let outcome = batch_transition(&mut p, &staff, &ids, ApplicationStatus::Processing, None)
        .expect("Batch should run");

    assert_eq!(outcome.succeeded, ids);
    assert!(outcome.failed.is_empty());
}

#[test]
fn mixed_batch_reports_failures_without_halting() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");

    let first_service = create_test_service(&mut p, &admin, "Birth Certificate");
    let second_service = create_test_service(&mut p, &admin, "Trade License");
    let first = submit_test_application(&mut p, &citizen, first_service.id);
    let second = submit_test_application(&mut p, &citizen, second_service.id);

    // Already processing, so the batch's pending -> processing fails for it
    transition_application(&mut p, &staff, first.id, ApplicationStatus::Processing, None)
        .expect("Failed to move to processing");

    let ids = [first.id, 9999, second.id];
    let outcome = batch_transition(&mut p, &staff, &ids, ApplicationStatus::Processing, None)
        .expect("Batch should run");

    assert_eq!(outcome.succeeded, vec![second.id]);
    assert_eq!(outcome.failed.len(), 2);
    assert_eq!(outcome.failed[0].application_id, first.id);
    assert_eq!(outcome.failed[1].application_id, 9999);
}

#[test]
fn batch_remarks_are_applied_to_each_success() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");

    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    let application = submit_test_application(&mut p, &citizen, service.id);
    transition_application(&mut p, &staff, application.id, ApplicationStatus::Processing, None)
        .expect("Failed to move to processing");

    let outcome = batch_transition(
        &mut p,
        &staff,
        &[application.id],
        ApplicationStatus::Approved,
        Some("Camp verification complete"),
    )
    .expect("Batch should run");
    assert_eq!(outcome.succeeded, vec![application.id]);

    let updated = crate::applications::get_application(&mut p, &staff, application.id)
        .expect("Failed to fetch");
    assert_eq!(updated.status, "approved");
    assert_eq!(updated.remarks, "Camp verification complete");
}

#[test]
fn citizen_cannot_run_a_batch() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    let application = submit_test_application(&mut p, &citizen, service.id);

    let result = batch_transition(
        &mut p,
        &citizen,
        &[application.id],
        ApplicationStatus::Processing,
        None,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut p = test_persistence();
    let staff = create_staff(&mut p, "staff@panchayat.test");

    let outcome = batch_transition(&mut p, &staff, &[], ApplicationStatus::Processing, None)
        .expect("Empty batch should run");
    assert!(outcome.succeeded.is_empty());
    assert!(outcome.failed.is_empty());
}
