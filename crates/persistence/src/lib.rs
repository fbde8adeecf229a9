// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Gram Panchayat services portal.
//!
//! This crate stores accounts, sessions, the service catalog, citizen
//! applications, and the activity log. It is built on Diesel over
//! `SQLite` with embedded migrations.
//!
//! ## Concurrency model
//!
//! The portal runs every statement through a single adapter guarded by a
//! mutex at the server layer, but correctness never relies on that:
//! - application submission folds the duplicate-open check, the per-day
//!   counter bump, and the insert into one transaction
//! - status changes are conditional updates keyed on the status the
//!   caller last read, so a lost race surfaces as zero affected rows
//!   rather than a silently overwritten state
//!
//! ## Testing
//!
//! Standard tests run against unique shared in-memory databases; each
//! `new_in_memory()` call receives its own instance via an atomic counter.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use gram_panchayat_audit::ActivityEvent;
use gram_panchayat_domain::{ApplicationStatus, Role};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    ActivityRow, ApplicationRow, PrincipalData, ServiceRow, SessionData,
};
pub use error::PersistenceError;
pub use queries::applications::ApplicationFilter;
pub use queries::principals::verify_password;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, giving
/// deterministic test isolation without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

fn now_iso() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::QueryFailed(format!("timestamp formatting failed: {e}")))
}

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL gives better read concurrency for file-based databases
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ---- principals ----

    /// Create an account with a hashed password and an initial role.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is taken.
    pub fn create_principal(
        &mut self,
        email: &str,
        display_name: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, PersistenceError> {
        let now: String = now_iso()?;
        mutations::principals::create_principal(
            &mut self.conn,
            email,
            display_name,
            password,
            role.as_str(),
            &now,
        )
    }

    /// Set or replace a principal's role assignment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the principal does not exist.
    pub fn set_role_assignment(
        &mut self,
        principal_id: i64,
        role: Role,
    ) -> Result<(), PersistenceError> {
        mutations::principals::set_role_assignment(&mut self.conn, principal_id, role.as_str())
    }

    /// Remove a principal's role assignment, returning them to the citizen
    /// default.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear_role_assignment(&mut self, principal_id: i64) -> Result<(), PersistenceError> {
        mutations::principals::clear_role_assignment(&mut self.conn, principal_id)
    }

    /// Delete a principal together with their applications, sessions, and
    /// role assignment. Returns the number of applications removed.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the principal does not exist.
    pub fn delete_principal_cascade(
        &mut self,
        principal_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::principals::delete_principal_cascade(&mut self.conn, principal_id)
    }

    /// Look up a principal by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_principal_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<PrincipalData>, PersistenceError> {
        queries::principals::get_principal_by_email(&mut self.conn, email)
    }

    /// Look up a principal by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_principal_by_id(
        &mut self,
        principal_id: i64,
    ) -> Result<Option<PrincipalData>, PersistenceError> {
        queries::principals::get_principal_by_id(&mut self.conn, principal_id)
    }

    /// Check whether a principal exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn principal_exists(&mut self, principal_id: i64) -> Result<bool, PersistenceError> {
        queries::principals::principal_exists(&mut self.conn, principal_id)
    }

    /// Fetch a principal's recorded role string, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_role_assignment(
        &mut self,
        principal_id: i64,
    ) -> Result<Option<String>, PersistenceError> {
        queries::principals::get_role_assignment(&mut self.conn, principal_id)
    }

    /// Count principals resolving to the citizen role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_citizens(&mut self) -> Result<i64, PersistenceError> {
        queries::principals::count_citizens(&mut self.conn)
    }

    /// Count every principal, whatever their role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_principals(&mut self) -> Result<i64, PersistenceError> {
        queries::principals::count_principals(&mut self.conn)
    }

    // ---- sessions ----

    /// Insert a new session row, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        principal_id: i64,
        created_at: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(
            &mut self.conn,
            session_token,
            principal_id,
            created_at,
            expires_at,
        )
    }

    /// Look up a session by its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Touch a session's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        let now: String = now_iso()?;
        mutations::sessions::update_session_activity(&mut self.conn, session_id, &now)
    }

    /// Delete the session with the given token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Delete every expired session, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        let now: String = now_iso()?;
        mutations::sessions::delete_expired_sessions(&mut self.conn, &now)
    }

    // ---- services ----

    /// Insert a new catalog service, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_service(
        &mut self,
        name: &str,
        category: &str,
        fee: u32,
        requirements: &str,
    ) -> Result<i64, PersistenceError> {
        let fee: i32 = i32::try_from(fee)
            .map_err(|_| PersistenceError::QueryFailed("fee exceeds storable range".to_string()))?;
        let now: String = now_iso()?;
        mutations::services::create_service(&mut self.conn, name, category, fee, requirements, &now)
    }

    /// Overwrite a service's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the service does not exist.
    pub fn update_service(
        &mut self,
        service_id: i64,
        name: &str,
        category: &str,
        fee: u32,
        requirements: &str,
    ) -> Result<(), PersistenceError> {
        let fee: i32 = i32::try_from(fee)
            .map_err(|_| PersistenceError::QueryFailed("fee exceeds storable range".to_string()))?;
        let now: String = now_iso()?;
        mutations::services::update_service(
            &mut self.conn,
            service_id,
            name,
            category,
            fee,
            requirements,
            &now,
        )
    }

    /// Mark a service inactive.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the service does not exist.
    pub fn deactivate_service(&mut self, service_id: i64) -> Result<(), PersistenceError> {
        let now: String = now_iso()?;
        mutations::services::deactivate_service(&mut self.conn, service_id, &now)
    }

    /// Look up a service by id, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_service(
        &mut self,
        service_id: i64,
    ) -> Result<Option<ServiceRow>, PersistenceError> {
        queries::services::get_service(&mut self.conn, service_id)
    }

    /// List catalog services.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_services(
        &mut self,
        category: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<ServiceRow>, PersistenceError> {
        queries::services::list_services(&mut self.conn, category, include_inactive)
    }

    /// Search active services by substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_services(&mut self, term: &str) -> Result<Vec<ServiceRow>, PersistenceError> {
        queries::services::search_services(&mut self.conn, term)
    }

    // ---- applications ----

    /// Submit a new application for the given service, snapshotting its
    /// name and fee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateOpenApplication` if the citizen
    /// already has an open application for the service.
    pub fn create_application(
        &mut self,
        citizen_id: i64,
        service: &ServiceRow,
        reason: &str,
    ) -> Result<ApplicationRow, PersistenceError> {
        let now_utc = OffsetDateTime::now_utc();
        let now: String = now_utc
            .format(&Iso8601::DEFAULT)
            .map_err(|e| PersistenceError::QueryFailed(format!("timestamp formatting failed: {e}")))?;

        mutations::applications::create_application(
            &mut self.conn,
            citizen_id,
            service.service_id,
            &service.name,
            service.fee,
            reason,
            now_utc.date(),
            &now,
        )
    }

    /// Look up an application by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_application(
        &mut self,
        application_id: i64,
    ) -> Result<Option<ApplicationRow>, PersistenceError> {
        queries::applications::get_application(&mut self.conn, application_id)
    }

    /// List applications matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applications(
        &mut self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRow>, PersistenceError> {
        queries::applications::list_applications(&mut self.conn, filter)
    }

    /// Conditionally move an application from `expected_status` to
    /// `new_status`. Returns the number of rows updated (0 or 1); zero
    /// means a concurrent writer changed the status first.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_application_status(
        &mut self,
        application_id: i64,
        expected_status: ApplicationStatus,
        new_status: ApplicationStatus,
        remarks: Option<&str>,
    ) -> Result<usize, PersistenceError> {
        let now: String = now_iso()?;
        mutations::applications::update_application_status(
            &mut self.conn,
            application_id,
            expected_status.as_str(),
            new_status.as_str(),
            remarks,
            &now,
        )
    }

    // ---- activity log ----

    /// Append one activity event, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_activity(&mut self, event: &ActivityEvent) -> Result<i64, PersistenceError> {
        mutations::activity::append_activity(&mut self.conn, event)
    }

    /// List the most recent activity events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_activity(&mut self, limit: i64) -> Result<Vec<ActivityRow>, PersistenceError> {
        queries::activity::list_activity(&mut self.conn, limit)
    }

    // ---- stats ----

    /// Count all applications grouped by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_applications_by_status(
        &mut self,
    ) -> Result<Vec<(String, i64)>, PersistenceError> {
        queries::stats::count_applications_by_status(&mut self.conn)
    }

    /// Count one citizen's applications grouped by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_citizen_applications_by_status(
        &mut self,
        citizen_id: i64,
    ) -> Result<Vec<(String, i64)>, PersistenceError> {
        queries::stats::count_citizen_applications_by_status(&mut self.conn, citizen_id)
    }

    /// Count applications created at or after the given ISO 8601 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_applications_since(&mut self, since: &str) -> Result<i64, PersistenceError> {
        queries::stats::count_applications_since(&mut self.conn, since)
    }

    /// Count active catalog services.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active_services(&mut self) -> Result<i64, PersistenceError> {
        queries::stats::count_active_services(&mut self.conn)
    }
}
