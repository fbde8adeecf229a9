// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Status string is not a recognized lifecycle state.
    InvalidStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Requested transition is not permitted by the lifecycle.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Explanation of the rejection.
        reason: String,
    },
    /// Role string is not a recognized role.
    InvalidRole {
        /// The unrecognized role string.
        role: String,
    },
    /// Application reason is empty or invalid.
    InvalidReason(String),
    /// Service name is empty or invalid.
    InvalidServiceName(String),
    /// Service category is empty or invalid.
    InvalidServiceCategory(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Display name is empty or invalid.
    InvalidDisplayName(String),
    /// Per-day application sequence is outside the mintable range.
    SequenceOutOfRange {
        /// The rejected sequence value.
        sequence: u32,
    },
    /// Stored application number does not match the expected shape.
    InvalidApplicationNumber {
        /// The rejected value.
        value: String,
        /// Explanation of the rejection.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus { status } => {
                write!(f, "Invalid application status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidRole { role } => write!(f, "Invalid role: '{role}'"),
            Self::InvalidReason(msg) => write!(f, "Invalid application reason: {msg}"),
            Self::InvalidServiceName(msg) => write!(f, "Invalid service name: {msg}"),
            Self::InvalidServiceCategory(msg) => {
                write!(f, "Invalid service category: {msg}")
            }
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::SequenceOutOfRange { sequence } => {
                write!(
                    f,
                    "Application sequence {sequence} is outside the range 1..=9999"
                )
            }
            Self::InvalidApplicationNumber { value, reason } => {
                write!(f, "Invalid application number '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
