// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session query operations.

use crate::data_models::SessionData;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Look up a session by its token.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    Ok(sessions::table
        .filter(sessions::session_token.eq(session_token))
        .first::<SessionData>(conn)
        .optional()?)
}
