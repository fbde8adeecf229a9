// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gram_panchayat_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// The requested resource was not found.
    NotFound(String),
    /// An account already exists for the email.
    DuplicateEmail(String),
    /// The citizen already has an open application for the service.
    DuplicateOpenApplication {
        citizen_id: i64,
        service_id: i64,
    },
    /// The per-day application number space is exhausted.
    DailySequenceExhausted {
        counter_date: String,
    },
    /// A stored row failed to convert back into a domain value.
    CorruptRecord(String),
    /// Password hashing failed.
    PasswordHashFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "An account already exists for email '{email}'")
            }
            Self::DuplicateOpenApplication {
                citizen_id,
                service_id,
            } => {
                write!(
                    f,
                    "Citizen {citizen_id} already has an open application for service {service_id}"
                )
            }
            Self::DailySequenceExhausted { counter_date } => {
                write!(
                    f,
                    "Application number sequence for {counter_date} is exhausted"
                )
            }
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::PasswordHashFailed(msg) => write!(f, "Password hashing failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::CorruptRecord(err.to_string())
    }
}
