// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog service query operations.

use crate::data_models::ServiceRow;
use crate::diesel_schema::services;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Look up a service by id, active or not.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_service(
    conn: &mut SqliteConnection,
    service_id: i64,
) -> Result<Option<ServiceRow>, PersistenceError> {
    Ok(services::table
        .filter(services::service_id.eq(service_id))
        .first::<ServiceRow>(conn)
        .optional()?)
}

/// List catalog services, optionally narrowed to one category.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_services(
    conn: &mut SqliteConnection,
    category: Option<&str>,
    include_inactive: bool,
) -> Result<Vec<ServiceRow>, PersistenceError> {
    let mut query = services::table.into_boxed();

    if let Some(category) = category {
        query = query.filter(services::category.eq(category.to_string()));
    }
    if !include_inactive {
        query = query.filter(services::is_active.eq(1));
    }

    Ok(query
        .order((services::category.asc(), services::name.asc()))
        .load::<ServiceRow>(conn)?)
}

/// Case-insensitive substring search over name, category, and requirements.
///
/// Only active services are searchable.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn search_services(
    conn: &mut SqliteConnection,
    term: &str,
) -> Result<Vec<ServiceRow>, PersistenceError> {
    let pattern: String = format!("%{term}%");

    Ok(services::table
        .filter(services::is_active.eq(1))
        .filter(
            services::name
                .like(pattern.clone())
                .or(services::category.like(pattern.clone()))
                .or(services::requirements.like(pattern)),
        )
        .order((services::category.asc(), services::name.asc()))
        .load::<ServiceRow>(conn)?)
}
