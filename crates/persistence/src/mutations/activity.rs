// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Activity log mutation operations. Append-only.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewActivity;
use crate::diesel_schema::activity_log;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use gram_panchayat_audit::ActivityEvent;

/// Append one activity event, returning its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_activity(
    conn: &mut SqliteConnection,
    event: &ActivityEvent,
) -> Result<i64, PersistenceError> {
    let record = NewActivity {
        actor_id: event.actor.id,
        actor_role: event.actor.role.as_str(),
        action_name: &event.action.name,
        action_details: event.action.details.as_deref(),
        target: event.target.as_deref(),
        recorded_at: &event.recorded_at,
    };

    diesel::insert_into(activity_log::table)
        .values(&record)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
