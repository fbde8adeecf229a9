// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principal (account) mutation operations.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewPrincipal, NewRoleAssignment};
use crate::diesel_schema::{applications, principals, role_assignments, sessions};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;

/// Create a principal with a freshly hashed password and an initial role
/// assignment, in one transaction.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if an account already exists
/// for the email, or `PersistenceError::PasswordHashFailed` if hashing fails.
pub fn create_principal(
    conn: &mut SqliteConnection,
    email: &str,
    display_name: &str,
    password: &str,
    role: &str,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::PasswordHashFailed(e.to_string()))?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let record = NewPrincipal {
            email,
            display_name,
            password_hash: &password_hash,
            created_at,
        };

        let insert_result = diesel::insert_into(principals::table)
            .values(&record)
            .execute(conn);

        if let Err(diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        )) = insert_result
        {
            return Err(PersistenceError::DuplicateEmail(email.to_string()));
        }
        insert_result?;

        let principal_id: i64 = get_last_insert_rowid(conn)?;

        diesel::insert_into(role_assignments::table)
            .values(&NewRoleAssignment { principal_id, role })
            .execute(conn)?;

        Ok(principal_id)
    })
}

/// Set (or replace) a principal's role assignment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the principal does not exist.
pub fn set_role_assignment(
    conn: &mut SqliteConnection,
    principal_id: i64,
    role: &str,
) -> Result<(), PersistenceError> {
    let exists: i64 = principals::table
        .filter(principals::principal_id.eq(principal_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Principal {principal_id} not found"
        )));
    }

    diesel::insert_into(role_assignments::table)
        .values(&NewRoleAssignment { principal_id, role })
        .on_conflict(role_assignments::principal_id)
        .do_update()
        .set(role_assignments::role.eq(role))
        .execute(conn)?;

    Ok(())
}

/// Remove a principal's role assignment. A principal without an assignment
/// falls back to the citizen default.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn clear_role_assignment(
    conn: &mut SqliteConnection,
    principal_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(
        role_assignments::table.filter(role_assignments::principal_id.eq(principal_id)),
    )
    .execute(conn)?;

    Ok(())
}

/// Delete a principal and everything that hangs off it, in one transaction.
///
/// Applications are removed first, then sessions and the role assignment,
/// then the principal row. Returns the number of applications removed.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the principal does not exist.
pub fn delete_principal_cascade(
    conn: &mut SqliteConnection,
    principal_id: i64,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let exists: i64 = principals::table
            .filter(principals::principal_id.eq(principal_id))
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Principal {principal_id} not found"
            )));
        }

        let applications_removed: usize = diesel::delete(
            applications::table.filter(applications::citizen_id.eq(principal_id)),
        )
        .execute(conn)?;

        diesel::delete(sessions::table.filter(sessions::principal_id.eq(principal_id)))
            .execute(conn)?;
        diesel::delete(
            role_assignments::table.filter(role_assignments::principal_id.eq(principal_id)),
        )
        .execute(conn)?;
        diesel::delete(principals::table.filter(principals::principal_id.eq(principal_id)))
            .execute(conn)?;

        Ok(applications_removed)
    })
}
