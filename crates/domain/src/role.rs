// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles for the portal.
//!
//! Every authenticated principal resolves to exactly one role. A principal
//! with no recorded role assignment is treated as a citizen.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roles determine what operations a principal may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Citizens submit applications for their own account and may cancel
    /// them while still pending.
    Citizen,
    /// Staff adjudicate applications and can view any citizen's submissions.
    Staff,
    /// Administrators hold staff authority plus catalog management, role
    /// assignment, and account removal.
    Administrator,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Staff => "staff",
            Self::Administrator => "administrator",
        }
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the string is not a valid role.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "citizen" => Ok(Self::Citizen),
            "staff" => Ok(Self::Staff),
            "administrator" => Ok(Self::Administrator),
            _ => Err(DomainError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }

    /// Returns true if this role may adjudicate applications.
    #[must_use]
    pub const fn is_adjudicator(&self) -> bool {
        matches!(self, Self::Staff | Self::Administrator)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
