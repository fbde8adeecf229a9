// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-facing application numbers.
//!
//! Numbers take the form `APP/YYYYMMDD/NNNN` where `NNNN` is a zero-padded
//! per-day sequence starting at 0001. The sequence is allocated by
//! persistence; this module only owns the format.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

/// Highest sequence a single day can hold before the four-digit suffix
/// would overflow.
pub const DAILY_SEQUENCE_LIMIT: u32 = 9999;

/// A validated `APP/YYYYMMDD/NNNN` application number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationNumber(String);

impl ApplicationNumber {
    /// Mints the number for the given issue date and per-day sequence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SequenceOutOfRange` if the sequence is zero or
    /// exceeds [`DAILY_SEQUENCE_LIMIT`].
    pub fn mint(date: Date, sequence: u32) -> Result<Self, DomainError> {
        if sequence == 0 || sequence > DAILY_SEQUENCE_LIMIT {
            return Err(DomainError::SequenceOutOfRange { sequence });
        }

        let month: u8 = u8::from(date.month());
        Ok(Self(format!(
            "APP/{:04}{:02}{:02}/{:04}",
            date.year(),
            month,
            date.day(),
            sequence
        )))
    }

    /// Parses a stored application number, checking only the shape.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApplicationNumber` if the value does not
    /// match `APP/YYYYMMDD/NNNN`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let malformed = |reason: &str| DomainError::InvalidApplicationNumber {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = value.split('/');
        let (prefix, date_part, seq_part) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(prefix), Some(date_part), Some(seq_part), None) => (prefix, date_part, seq_part),
            _ => return Err(malformed("expected three slash-separated segments")),
        };

        if prefix != "APP" {
            return Err(malformed("expected APP prefix"));
        }
        if date_part.len() != 8 || !date_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("expected eight-digit date segment"));
        }
        if seq_part.len() != 4 || !seq_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("expected four-digit sequence segment"));
        }

        Ok(Self(value.to_string()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the per-day sequence encoded in the suffix.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        // The constructor guarantees a four-digit numeric suffix.
        self.0
            .rsplit('/')
            .next()
            .and_then(|suffix| suffix.parse::<u32>().ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for ApplicationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
