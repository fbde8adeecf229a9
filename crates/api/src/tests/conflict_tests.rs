// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_admin, create_staff, create_test_service, register_citizen, submit_test_application, test_persistence};
use crate::applications::{apply_transition_with_stale_read, transition_application};
use crate::error::ApiError;
use gram_panchayat_domain::{Application, ApplicationStatus};

fn load_raw(p: &mut gram_panchayat_persistence::Persistence, id: i64) -> Application {
    p.get_application(id)
        .expect("Query should run")
        .expect("Application should exist")
        .into_application()
        .expect("Row should convert")
}

#[test]
fn stale_writer_gets_a_conflict() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    let submitted = submit_test_application(&mut p, &citizen, service.id);

    // Both writers read the application while it is still pending
    let stale: Application = load_raw(&mut p, submitted.id);

    // The citizen's cancellation lands first
    crate::applications::cancel_application(&mut p, &citizen, submitted.id)
        .expect("Cancellation should land");

    // The staff writer still holds the pending snapshot
    let result =
        apply_transition_with_stale_read(&mut p, &staff, &stale, ApplicationStatus::Processing);
    assert!(matches!(result, Err(ApiError::Conflict { .. })));

    // The stored state is untouched by the losing writer
    let current = load_raw(&mut p, submitted.id);
    assert_eq!(current.status, ApplicationStatus::Cancelled);
}

#[test]
fn conflict_leaves_remarks_intact() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    let submitted = submit_test_application(&mut p, &citizen, service.id);

    let stale: Application = load_raw(&mut p, submitted.id);

    transition_application(
        &mut p,
        &staff,
        submitted.id,
        ApplicationStatus::Processing,
        Some("Taken up for verification"),
    )
    .expect("First writer should land");

    let result = apply_transition_with_stale_read(&mut p, &staff, &stale, ApplicationStatus::Processing);
    assert!(matches!(result, Err(ApiError::Conflict { .. })));

    let current = load_raw(&mut p, submitted.id);
    assert_eq!(current.status, ApplicationStatus::Processing);
    assert_eq!(current.remarks, "Taken up for verification");
}

#[test]
fn retry_after_conflict_succeeds_with_fresh_state() {
    let mut p = test_persistence();
    let admin = create_admin(&mut p, "admin@panchayat.test");
    let staff = create_staff(&mut p, "staff@panchayat.test");
    let citizen = register_citizen(&mut p, "asha@village.test");
    let service = create_test_service(&mut p, &admin, "Birth Certificate");
    let submitted = submit_test_application(&mut p, &citizen, service.id);

    let stale: Application = load_raw(&mut p, submitted.id);
    transition_application(&mut p, &staff, submitted.id, ApplicationStatus::Processing, None)
        .expect("First writer should land");

    let conflicted = apply_transition_with_stale_read(&mut p, &staff, &stale, ApplicationStatus::Processing);
    assert!(matches!(conflicted, Err(ApiError::Conflict { .. })));

    // A re-read sees processing, from which approval is legal
    let approved = transition_application(
        &mut p,
        &staff,
        submitted.id,
        ApplicationStatus::Approved,
        None,
    )
    .expect("Retry with fresh state should land");
    assert_eq!(approved.status, "approved");
}
