// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types shared with the HTTP layer.

use gram_panchayat_domain::{Application, ApplicationStatus, ServiceDescriptor};
use serde::{Deserialize, Serialize};

/// Request to register a new citizen account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub confirm_password: String,
}

/// Response for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub principal_id: i64,
    pub email: String,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub principal_id: i64,
    pub role: String,
    pub display_name: String,
}

/// Request to submit a new application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub service_id: i64,
    pub reason: String,
}

/// A single application, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: i64,
    pub application_number: String,
    pub citizen_id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub fee: u32,
    pub reason: String,
    pub status: String,
    pub remarks: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            application_number: application.application_number.to_string(),
            citizen_id: application.citizen_id,
            service_id: application.service_id,
            service_name: application.service_name,
            fee: application.fee,
            reason: application.reason,
            status: application.status.as_str().to_string(),
            remarks: application.remarks,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

/// Request to change one application's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// The target status string (e.g., `processing`).
    pub status: String,
    /// Optional remarks to store with the transition.
    pub remarks: Option<String>,
}

/// Request to change the status of many applications at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTransitionRequest {
    pub application_ids: Vec<i64>,
    pub status: String,
    pub remarks: Option<String>,
}

/// One failed entry of a batch transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub application_id: i64,
    pub error: String,
}

/// Outcome of a best-effort batch transition.
///
/// One entry's failure never rolls back the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTransitionOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<BatchFailure>,
}

/// Listing filter accepted by [`crate::list_applications`].
#[derive(Debug, Clone, Default)]
pub struct ListApplicationsParams {
    pub citizen_id: Option<i64>,
    pub service_id: Option<i64>,
    pub statuses: Vec<ApplicationStatus>,
}

/// Request to create a catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub category: String,
    pub fee: u32,
    #[serde(default)]
    pub requirements: String,
}

/// Request to edit a catalog service. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub fee: Option<u32>,
    pub requirements: Option<String>,
}

/// A catalog service, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub fee: u32,
    pub requirements: String,
    pub is_active: bool,
}

impl From<ServiceDescriptor> for ServiceResponse {
    fn from(service: ServiceDescriptor) -> Self {
        Self {
            id: service.id,
            name: service.name,
            category: service.category,
            fee: service.fee,
            requirements: service.requirements,
            is_active: service.is_active,
        }
    }
}

/// One status bucket of a dashboard count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Portal-wide statistics for the staff dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub total_citizens: i64,
    pub active_services: i64,
    pub applications_by_status: Vec<StatusCount>,
    pub applications_today: i64,
}

/// One citizen's own application statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub processing: i64,
    pub approved: i64,
    pub rejected: i64,
    pub cancelled: i64,
}

/// Response for an account deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub principal_id: i64,
    pub applications_removed: usize,
}

/// One recorded activity event, as returned to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEventResponse {
    pub event_id: i64,
    pub actor_id: i64,
    pub actor_role: String,
    pub action: String,
    pub details: Option<String>,
    pub target: Option<String>,
    pub recorded_at: String,
}
