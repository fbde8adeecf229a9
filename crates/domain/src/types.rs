// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core entity records shared across the portal.

use crate::application_number::ApplicationNumber;
use crate::status::ApplicationStatus;
use serde::{Deserialize, Serialize};

/// A catalog entry describing a government service citizens may apply for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Processing fee in rupees; zero means the service is free.
    pub fee: u32,
    /// Free-text description of required documents.
    pub requirements: String,
    /// Inactive services stay queryable but accept no new applications.
    pub is_active: bool,
}

/// A citizen's application for a catalog service.
///
/// `service_name` and `fee` are snapshots taken at submission time; later
/// catalog edits never rewrite them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub application_number: ApplicationNumber,
    pub citizen_id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub fee: u32,
    pub reason: String,
    pub status: ApplicationStatus,
    pub remarks: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Application {
    /// Returns true if the application still blocks a new submission for
    /// the same service.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}
