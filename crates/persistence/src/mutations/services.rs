// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog service mutation operations.
//!
//! Services are soft-removed by flipping `is_active`; rows are never
//! deleted so application snapshots keep a valid foreign key.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewService;
use crate::diesel_schema::services;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// Insert a new catalog service.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_service(
    conn: &mut SqliteConnection,
    name: &str,
    category: &str,
    fee: i32,
    requirements: &str,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let record = NewService {
        name,
        category,
        fee,
        requirements,
        is_active: 1,
        created_at,
        updated_at: created_at,
    };

    diesel::insert_into(services::table)
        .values(&record)
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Overwrite a service's editable fields.
///
/// Callers resolve partial updates against the current row before calling;
/// this function always writes the full field set.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the service does not exist.
pub fn update_service(
    conn: &mut SqliteConnection,
    service_id: i64,
    name: &str,
    category: &str,
    fee: i32,
    requirements: &str,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(services::table.filter(services::service_id.eq(service_id)))
            .set((
                services::name.eq(name),
                services::category.eq(category),
                services::fee.eq(fee),
                services::requirements.eq(requirements),
                services::updated_at.eq(updated_at),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Service {service_id} not found"
        )));
    }

    Ok(())
}

/// Mark a service inactive so it stops accepting applications.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the service does not exist.
pub fn deactivate_service(
    conn: &mut SqliteConnection,
    service_id: i64,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(services::table.filter(services::service_id.eq(service_id)))
            .set((
                services::is_active.eq(0),
                services::updated_at.eq(updated_at),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Service {service_id} not found"
        )));
    }

    Ok(())
}
