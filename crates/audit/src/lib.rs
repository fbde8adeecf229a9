// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use gram_panchayat_domain::Role;

/// Represents the principal performing a recorded action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The principal's identifier.
    pub id: i64,
    /// The role the principal held when the action ran.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The principal's identifier
    /// * `role` - The role the principal held when the action ran
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SubmitApplication`", "`AssignRole`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// An activity event recording one successful administrative or
/// lifecycle action.
///
/// Events are append-only; nothing in the portal edits or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    /// The principal who initiated the action.
    pub actor: Actor,
    /// The action that was performed.
    pub action: Action,
    /// The entity acted upon, when one exists (e.g., an application
    /// number or a service id).
    pub target: Option<String>,
    /// ISO 8601 timestamp at which the action completed.
    pub recorded_at: String,
}

impl ActivityEvent {
    /// Creates a new `ActivityEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The principal who initiated the action
    /// * `action` - The action that was performed
    /// * `target` - The entity acted upon, if any
    /// * `recorded_at` - ISO 8601 completion timestamp
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        target: Option<String>,
        recorded_at: String,
    ) -> Self {
        Self {
            actor,
            action,
            target,
            recorded_at,
        }
    }
}
