// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation and authorization boundary for the portal.
//!
//! Every state change goes through this crate: handlers hand it an
//! authenticated principal and a request, and it enforces roles, runs the
//! domain rules, drives persistence, and records activity events.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod activity;
mod admin;
mod applications;
mod auth;
mod catalog;
mod error;
mod password_policy;
mod request_response;
mod roles;

#[cfg(test)]
mod tests;

pub use admin::{assign_role, citizen_stats, dashboard_stats, delete_user, list_activity};
pub use applications::{
    batch_transition, cancel_application, get_application, list_applications,
    submit_application, transition_application,
};
pub use auth::{AuthenticatedPrincipal, AuthenticationService};
pub use catalog::{
    create_service, deactivate_service, get_service, list_services, search_services,
    update_service,
};
pub use error::{ApiError, AuthError};
pub use password_policy::{MIN_PASSWORD_LENGTH, PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    ActivityEventResponse, ApplicationResponse, BatchFailure, BatchTransitionOutcome,
    BatchTransitionRequest, CitizenStatsResponse, CreateServiceRequest, DashboardStatsResponse,
    DeleteUserResponse, ListApplicationsParams, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, ServiceResponse, StatusCount, SubmitApplicationRequest, TransitionRequest,
    UpdateServiceRequest,
};
pub use roles::{require_administrator, require_adjudicator, resolve_role};
