// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates the free-text reason attached to a new application.
///
/// # Errors
///
/// Returns `DomainError::InvalidReason` if the reason is empty or
/// whitespace-only.
pub fn validate_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::InvalidReason(String::from(
            "Reason cannot be empty",
        )));
    }

    Ok(())
}

/// Validates the user-settable fields of a catalog service.
///
/// # Errors
///
/// Returns an error if:
/// - The service name is empty
/// - The category is empty
pub fn validate_service_fields(name: &str, category: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidServiceName(String::from(
            "Service name cannot be empty",
        )));
    }

    if category.trim().is_empty() {
        return Err(DomainError::InvalidServiceCategory(String::from(
            "Category cannot be empty",
        )));
    }

    Ok(())
}

/// Validates the shape of an email address used as a login identifier.
///
/// This is a structural check only; deliverability is out of scope.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is empty, contains
/// whitespace, or lacks a local part or domain around a single `@`.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot contain whitespace",
        )));
    }

    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(DomainError::InvalidEmail(String::from(
            "Email must look like name@domain.tld",
        ))),
    }
}

/// Validates a principal's display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidDisplayName` if the name is empty or
/// whitespace-only.
pub fn validate_display_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "Display name cannot be empty",
        )));
    }

    Ok(())
}
