// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutation operations.
//!
//! Submission bundles the duplicate-open check, the per-day counter bump,
//! and the insert into a single transaction so concurrent submissions can
//! never mint the same number or slip past the one-open-application rule.
//! Status changes go through a conditional update keyed on the status the
//! caller last read; zero affected rows means a concurrent writer won.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ApplicationRow, NewApplication};
use crate::diesel_schema::{application_counters, applications};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use gram_panchayat_domain::{ApplicationNumber, ApplicationStatus};
use time::Date;

/// Open statuses for the duplicate check.
const OPEN_STATUSES: [&str; 2] = [
    ApplicationStatus::Pending.as_str(),
    ApplicationStatus::Processing.as_str(),
];

fn counter_key(issue_date: Date) -> String {
    format!(
        "{:04}{:02}{:02}",
        issue_date.year(),
        u8::from(issue_date.month()),
        issue_date.day()
    )
}

/// Submit a new application.
///
/// Runs entirely inside one transaction:
/// 1. reject if the citizen already has an open application for the service
/// 2. bump (or seed) the per-day counter and mint the application number
/// 3. insert the row with status `pending`
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateOpenApplication` if the citizen has
/// an open application for the service, or
/// `PersistenceError::DailySequenceExhausted` if the day's number space is
/// used up.
#[allow(clippy::too_many_arguments)]
pub fn create_application(
    conn: &mut SqliteConnection,
    citizen_id: i64,
    service_id: i64,
    service_name: &str,
    fee: i32,
    reason: &str,
    issue_date: Date,
    now: &str,
) -> Result<ApplicationRow, PersistenceError> {
    conn.transaction::<ApplicationRow, PersistenceError, _>(|conn| {
        let open_count: i64 = applications::table
            .filter(applications::citizen_id.eq(citizen_id))
            .filter(applications::service_id.eq(service_id))
            .filter(applications::status.eq_any(OPEN_STATUSES))
            .count()
            .get_result(conn)?;

        if open_count > 0 {
            return Err(PersistenceError::DuplicateOpenApplication {
                citizen_id,
                service_id,
            });
        }

        let key: String = counter_key(issue_date);

        diesel::insert_into(application_counters::table)
            .values((
                application_counters::counter_date.eq(&key),
                application_counters::next_sequence.eq(1),
            ))
            .on_conflict(application_counters::counter_date)
            .do_update()
            .set(
                application_counters::next_sequence
                    .eq(application_counters::next_sequence + 1),
            )
            .execute(conn)?;

        let sequence: i32 = application_counters::table
            .filter(application_counters::counter_date.eq(&key))
            .select(application_counters::next_sequence)
            .first(conn)?;

        let sequence: u32 = u32::try_from(sequence).map_err(|_| {
            PersistenceError::CorruptRecord(format!("negative counter for {key}"))
        })?;

        let number: ApplicationNumber =
            ApplicationNumber::mint(issue_date, sequence).map_err(|_| {
                PersistenceError::DailySequenceExhausted {
                    counter_date: key.clone(),
                }
            })?;

        let record = NewApplication {
            application_number: number.as_str(),
            citizen_id,
            service_id,
            service_name,
            fee,
            reason,
            status: ApplicationStatus::Pending.as_str(),
            remarks: "",
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(applications::table)
            .values(&record)
            .execute(conn)?;

        let application_id: i64 = get_last_insert_rowid(conn)?;

        Ok(applications::table
            .filter(applications::application_id.eq(application_id))
            .first::<ApplicationRow>(conn)?)
    })
}

/// Conditionally move an application to a new status.
///
/// The update matches on both the id and `expected_status`; if another
/// writer changed the status since the caller read it, zero rows match and
/// the caller sees a conflict. When `remarks` is `None` the stored remarks
/// are left untouched.
///
/// Returns the number of rows updated (0 or 1).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_application_status(
    conn: &mut SqliteConnection,
    application_id: i64,
    expected_status: &str,
    new_status: &str,
    remarks: Option<&str>,
    updated_at: &str,
) -> Result<usize, PersistenceError> {
    let target = applications::table
        .filter(applications::application_id.eq(application_id))
        .filter(applications::status.eq(expected_status));

    let updated: usize = match remarks {
        Some(remarks) => diesel::update(target)
            .set((
                applications::status.eq(new_status),
                applications::remarks.eq(remarks),
                applications::updated_at.eq(updated_at),
            ))
            .execute(conn)?,
        None => diesel::update(target)
            .set((
                applications::status.eq(new_status),
                applications::updated_at.eq(updated_at),
            ))
            .execute(conn)?,
    };

    Ok(updated)
}
