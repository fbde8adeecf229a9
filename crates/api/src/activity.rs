// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Helper for appending activity events from operations.

use crate::auth::AuthenticatedPrincipal;
use crate::error::ApiError;
use gram_panchayat_audit::{Action, ActivityEvent, Actor};
use gram_panchayat_persistence::Persistence;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

pub(crate) fn now_iso() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Appends one activity event attributed to the acting principal.
pub(crate) fn record_activity(
    persistence: &mut Persistence,
    actor: &AuthenticatedPrincipal,
    action_name: &str,
    details: Option<String>,
    target: Option<String>,
) -> Result<(), ApiError> {
    let event = ActivityEvent::new(
        Actor::new(actor.id, actor.role),
        Action::new(String::from(action_name), details),
        target,
        now_iso()?,
    );
    persistence.append_activity(&event)?;
    Ok(())
}
