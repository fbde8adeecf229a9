// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration, login, and session validation.

use time::{Duration, OffsetDateTime};
use gram_panchayat_domain::{Role, validate_display_name, validate_email};
use gram_panchayat_persistence::{
    Persistence, PrincipalData, SessionData, verify_password,
};
use std::str::FromStr;
use tracing::info;

use crate::activity::record_activity;
use crate::error::{ApiError, AuthError};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{RegisterRequest, RegisterResponse};

/// An authenticated principal with a resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    /// The principal's identifier.
    pub id: i64,
    /// The role resolved when the session was validated.
    pub role: Role,
    /// The principal's display name.
    pub display_name: String,
}

impl AuthenticatedPrincipal {
    /// Creates a new authenticated principal.
    #[must_use]
    pub const fn new(id: i64, role: Role, display_name: String) -> Self {
        Self {
            id,
            role,
            display_name,
        }
    }
}

/// Session-based authentication service.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Registers a new citizen account.
    ///
    /// Self-registration always produces a citizen; elevated roles are
    /// granted afterwards by an administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the email, display name, or password fails
    /// validation, or if the email is already registered.
    pub fn register(
        persistence: &mut Persistence,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        validate_email(&request.email)?;
        validate_display_name(&request.display_name)?;
        PasswordPolicy::default().validate(
            &request.password,
            &request.confirm_password,
            &request.email,
            &request.display_name,
        )?;

        let principal_id: i64 = persistence.create_principal(
            &request.email,
            &request.display_name,
            &request.password,
            Role::Citizen,
        )?;

        let actor = AuthenticatedPrincipal::new(
            principal_id,
            Role::Citizen,
            request.display_name.clone(),
        );
        record_activity(
            persistence,
            &actor,
            "RegisterCitizen",
            None,
            Some(request.email.clone()),
        )?;

        info!(principal_id, "registered new citizen account");
        Ok(RegisterResponse {
            principal_id,
            email: request.email.clone(),
        })
    }

    /// Authenticates a principal and creates a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_principal`)
    ///
    /// # Errors
    ///
    /// Returns an error if the email is unknown or the password is wrong.
    /// Both cases produce the same message.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedPrincipal), AuthError> {
        let principal: PrincipalData = persistence
            .get_principal_by_email(email)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            })?;

        let password_ok: bool = verify_password(password, &principal.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?;
        if !password_ok {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        let role: Role = Self::resolve_role_for_auth(persistence, principal.principal_id)?;

        let session_token: String = Self::generate_session_token();

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let expires_at: OffsetDateTime = now + Self::DEFAULT_SESSION_EXPIRATION;
        let format = time::format_description::well_known::Iso8601::DEFAULT;
        let now_str: String =
            now.format(&format)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format session time: {e}"),
                })?;
        let expires_at_str: String =
            expires_at
                .format(&format)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Failed to format expiration time: {e}"),
                })?;

        persistence
            .create_session(&session_token, principal.principal_id, &now_str, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        let authenticated = AuthenticatedPrincipal::new(
            principal.principal_id,
            role,
            principal.display_name,
        );

        Ok((session_token, authenticated))
    }

    /// Validates a session token and returns the authenticated principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown, expired, or its
    /// account no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedPrincipal, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let principal: PrincipalData = persistence
            .get_principal_by_id(session.principal_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account no longer exists"),
            })?;

        let role: Role = Self::resolve_role_for_auth(persistence, principal.principal_id)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?;

        Ok(AuthenticatedPrincipal::new(
            principal.principal_id,
            role,
            principal.display_name,
        ))
    }

    /// Logs out by deleting the session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    fn resolve_role_for_auth(
        persistence: &mut Persistence,
        principal_id: i64,
    ) -> Result<Role, AuthError> {
        let assignment: Option<String> = persistence
            .get_role_assignment(principal_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?;

        match assignment {
            Some(tag) => Role::from_str(&tag).map_err(|_| AuthError::AuthenticationFailed {
                reason: format!("Corrupt role assignment: {tag}"),
            }),
            // No assignment recorded: the principal is a citizen
            None => Ok(Role::Citizen),
        }
    }

    /// Generates a session token.
    ///
    /// In a production system, this would use a cryptographically secure
    /// random number generator. For simplicity, we use a timestamp-based
    /// approach here.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}
