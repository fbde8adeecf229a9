// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate counts for the dashboards.

use crate::diesel_schema::{applications, services};
use crate::error::PersistenceError;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Count applications grouped by status. Statuses with no applications
/// are absent from the result.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_applications_by_status(
    conn: &mut SqliteConnection,
) -> Result<Vec<(String, i64)>, PersistenceError> {
    Ok(applications::table
        .group_by(applications::status)
        .select((applications::status, count_star()))
        .load::<(String, i64)>(conn)?)
}

/// Count applications for one citizen grouped by status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_citizen_applications_by_status(
    conn: &mut SqliteConnection,
    citizen_id: i64,
) -> Result<Vec<(String, i64)>, PersistenceError> {
    Ok(applications::table
        .filter(applications::citizen_id.eq(citizen_id))
        .group_by(applications::status)
        .select((applications::status, count_star()))
        .load::<(String, i64)>(conn)?)
}

/// Count applications created at or after the given ISO 8601 timestamp.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_applications_since(
    conn: &mut SqliteConnection,
    since: &str,
) -> Result<i64, PersistenceError> {
    Ok(applications::table
        .filter(applications::created_at.ge(since))
        .count()
        .get_result(conn)?)
}

/// Count active catalog services.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active_services(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(services::table
        .filter(services::is_active.eq(1))
        .count()
        .get_result(conn)?)
}
