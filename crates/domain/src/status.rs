// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application status tracking and transition logic.
//!
//! This module defines application lifecycle states and valid transitions.
//! Transitions are actor-initiated only; the system never advances an
//! application based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Remarks recorded when a citizen cancels an application without
/// supplying their own reason.
pub const CANCELLED_BY_CITIZEN_REMARKS: &str = "Cancelled by user";

/// Lifecycle states of a citizen application.
///
/// Every application starts in `Pending`. `Approved`, `Rejected`, and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted and awaiting staff pickup
    Pending,
    /// A staff member has taken the application up for review
    Processing,
    /// Granted; terminal
    Approved,
    /// Denied; terminal
    Rejected,
    /// Withdrawn by the applicant before review began; terminal
    Cancelled,
}

impl ApplicationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }

    /// Returns true if this status counts as open for the purposes of the
    /// one-open-application-per-service rule.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // Cannot transition from terminal states
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        // Valid transitions based on current state
        let valid = match self {
            Self::Pending => matches!(new_status, Self::Processing | Self::Cancelled),
            Self::Processing => matches!(new_status, Self::Approved | Self::Rejected),
            Self::Approved | Self::Rejected | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by application lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
