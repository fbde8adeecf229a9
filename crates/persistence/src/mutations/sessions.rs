// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutation operations.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewSession;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Insert a new session row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    principal_id: i64,
    created_at: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    let record = NewSession {
        session_token,
        principal_id,
        created_at,
        last_activity_at: created_at,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&record)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Touch a session's last-activity timestamp.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
    last_activity_at: &str,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table.filter(sessions::session_id.eq(session_id)))
        .set(sessions::last_activity_at.eq(last_activity_at))
        .execute(conn)?;
    Ok(())
}

/// Delete the session with the given token. Deleting an unknown token is
/// not an error; logout is idempotent.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
        .execute(conn)?;
    Ok(())
}

/// Delete every session that expired at or before `now`.
///
/// Returns the number of sessions removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(conn)?,
    )
}
