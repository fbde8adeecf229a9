// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application_number;
mod error;
mod role;
mod status;
mod types;
mod validation;

pub use application_number::{ApplicationNumber, DAILY_SEQUENCE_LIMIT};
pub use error::DomainError;
pub use role::Role;
pub use status::{ApplicationStatus, CANCELLED_BY_CITIZEN_REMARKS};
pub use types::{Application, ServiceDescriptor};
pub use validation::{
    validate_display_name, validate_email, validate_reason, validate_service_fields,
};
