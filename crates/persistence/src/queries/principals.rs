// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principal (account) query operations.

use crate::data_models::PrincipalData;
use crate::diesel_schema::{principals, role_assignments};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Look up a principal by email.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_principal_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<PrincipalData>, PersistenceError> {
    Ok(principals::table
        .filter(principals::email.eq(email))
        .first::<PrincipalData>(conn)
        .optional()?)
}

/// Look up a principal by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_principal_by_id(
    conn: &mut SqliteConnection,
    principal_id: i64,
) -> Result<Option<PrincipalData>, PersistenceError> {
    Ok(principals::table
        .filter(principals::principal_id.eq(principal_id))
        .first::<PrincipalData>(conn)
        .optional()?)
}

/// Check whether a principal exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn principal_exists(
    conn: &mut SqliteConnection,
    principal_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = principals::table
        .filter(principals::principal_id.eq(principal_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Fetch a principal's role assignment string, if one is recorded.
///
/// Absence is not an error: unassigned principals default to citizen at
/// the API layer.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_role_assignment(
    conn: &mut SqliteConnection,
    principal_id: i64,
) -> Result<Option<String>, PersistenceError> {
    Ok(role_assignments::table
        .filter(role_assignments::principal_id.eq(principal_id))
        .select(role_assignments::role)
        .first::<String>(conn)
        .optional()?)
}

/// Count principals that resolve to the citizen role, including those
/// with no recorded assignment.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_citizens(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let elevated = role_assignments::table
        .filter(role_assignments::role.ne("citizen"))
        .select(role_assignments::principal_id);

    Ok(principals::table
        .filter(principals::principal_id.ne_all(elevated))
        .count()
        .get_result(conn)?)
}

/// Count every principal, whatever their role.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_principals(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(principals::table.count().get_result(conn)?)
}

/// Verify a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if hash verification fails to run.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))
}
