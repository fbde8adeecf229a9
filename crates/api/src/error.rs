// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use gram_panchayat_domain::DomainError;
use gram_panchayat_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract;
/// the server maps each variant onto an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the principal does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The requested status change is not permitted by the lifecycle.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A concurrent writer changed the application first; re-read and retry.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The citizen already has an open application for the service.
    DuplicateApplication {
        /// The service with the open application.
        service_id: i64,
        /// A human-readable description.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidTransition { from, to, message } => {
                write!(f, "Invalid transition from '{from}' to '{to}': {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::DuplicateApplication {
                service_id,
                message,
            } => {
                write!(f, "Duplicate application for service {service_id}: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidStatusTransition { from, to, reason } => Self::InvalidTransition {
                from,
                to,
                message: reason,
            },
            DomainError::InvalidStatus { status } => Self::InvalidInput {
                field: String::from("status"),
                message: format!("'{status}' is not a valid application status"),
            },
            DomainError::InvalidRole { role } => Self::InvalidInput {
                field: String::from("role"),
                message: format!("'{role}' is not a valid role"),
            },
            DomainError::InvalidReason(message) => Self::InvalidInput {
                field: String::from("reason"),
                message,
            },
            DomainError::InvalidServiceName(message) => Self::InvalidInput {
                field: String::from("name"),
                message,
            },
            DomainError::InvalidServiceCategory(message) => Self::InvalidInput {
                field: String::from("category"),
                message,
            },
            DomainError::InvalidEmail(message) => Self::InvalidInput {
                field: String::from("email"),
                message,
            },
            DomainError::InvalidDisplayName(message) => Self::InvalidInput {
                field: String::from("display_name"),
                message,
            },
            DomainError::SequenceOutOfRange { .. }
            | DomainError::InvalidApplicationNumber { .. } => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            PersistenceError::DuplicateEmail(email) => Self::InvalidInput {
                field: String::from("email"),
                message: format!("An account already exists for '{email}'"),
            },
            PersistenceError::DuplicateOpenApplication { service_id, .. } => {
                Self::DuplicateApplication {
                    service_id,
                    message: String::from(
                        "An application for this service is already pending or processing",
                    ),
                }
            }
            _ => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}
