// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation for citizen registration.

use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password equals the account email or display name.
    #[error("Password must not match {field}")]
    MatchesAccountField { field: String },

    /// Password and confirmation do not match.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Registration password policy.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password and its confirmation against the policy.
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the confirmation does not match,
    /// the password is shorter than `min_length`, or the password equals
    /// the account email or display name (case-insensitive).
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        email: &str,
        display_name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let password_lower: String = password.to_lowercase();
        if password_lower == email.to_lowercase() {
            return Err(PasswordPolicyError::MatchesAccountField {
                field: String::from("email"),
            });
        }
        if password_lower == display_name.to_lowercase() {
            return Err(PasswordPolicyError::MatchesAccountField {
                field: String::from("display_name"),
            });
        }

        Ok(())
    }
}
