// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod principal_tests;
mod service_tests;

use crate::{ApplicationRow, Persistence, ServiceRow};
use gram_panchayat_domain::Role;

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn create_test_citizen(persistence: &mut Persistence, email: &str) -> i64 {
    persistence
        .create_principal(email, "Test Citizen", "Secure#Pass9999", Role::Citizen)
        .expect("citizen creation should succeed")
}

pub fn create_test_service(persistence: &mut Persistence, name: &str) -> ServiceRow {
    let service_id = persistence
        .create_service(name, "Certificates", 50, "Aadhaar card, address proof")
        .expect("service creation should succeed");
    persistence
        .get_service(service_id)
        .expect("service lookup should succeed")
        .expect("service should exist after creation")
}

pub fn submit_test_application(
    persistence: &mut Persistence,
    citizen_id: i64,
    service: &ServiceRow,
) -> ApplicationRow {
    persistence
        .create_application(citizen_id, service, "Needed for school admission")
        .expect("application submission should succeed")
}
