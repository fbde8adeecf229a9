// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Activity log query operations.

use crate::data_models::ActivityRow;
use crate::diesel_schema::activity_log;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// List the most recent activity events, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_activity(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<ActivityRow>, PersistenceError> {
    Ok(activity_log::table
        .order((
            activity_log::recorded_at.desc(),
            activity_log::event_id.desc(),
        ))
        .limit(limit)
        .load::<ActivityRow>(conn)?)
}
