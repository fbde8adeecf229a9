// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application query operations.

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Filter for application listings. Empty fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub citizen_id: Option<i64>,
    pub service_id: Option<i64>,
    pub statuses: Option<Vec<String>>,
}

/// Look up an application by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Option<ApplicationRow>, PersistenceError> {
    Ok(applications::table
        .filter(applications::application_id.eq(application_id))
        .first::<ApplicationRow>(conn)
        .optional()?)
}

/// List applications matching the filter, newest first.
///
/// Row ids break ties between equal timestamps; ids are monotonic so the
/// order is stable.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_applications(
    conn: &mut SqliteConnection,
    filter: &ApplicationFilter,
) -> Result<Vec<ApplicationRow>, PersistenceError> {
    let mut query = applications::table.into_boxed();

    if let Some(citizen_id) = filter.citizen_id {
        query = query.filter(applications::citizen_id.eq(citizen_id));
    }
    if let Some(service_id) = filter.service_id {
        query = query.filter(applications::service_id.eq(service_id));
    }
    if let Some(statuses) = &filter.statuses {
        query = query.filter(applications::status.eq_any(statuses.clone()));
    }

    Ok(query
        .order((
            applications::created_at.desc(),
            applications::application_id.desc(),
        ))
        .load::<ApplicationRow>(conn)?)
}
