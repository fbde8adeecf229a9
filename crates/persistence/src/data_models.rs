// Copyright (C) 2026 Gram Panchayat Digital Services
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their conversions into domain values.

use crate::diesel_schema::{
    activity_log, applications, principals, role_assignments, services, sessions,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use gram_panchayat_audit::{Action, ActivityEvent, Actor};
use gram_panchayat_domain::{Application, ApplicationNumber, ApplicationStatus, Role};
use std::str::FromStr;

/// A registered account, as stored.
#[derive(Debug, Clone, Queryable)]
pub struct PrincipalData {
    pub principal_id: i64,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = principals)]
pub struct NewPrincipal<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub created_at: &'a str,
}

#[derive(Debug, Clone, Queryable)]
pub struct RoleAssignmentData {
    pub principal_id: i64,
    pub role: String,
}

#[derive(Insertable)]
#[diesel(table_name = role_assignments)]
pub struct NewRoleAssignment<'a> {
    pub principal_id: i64,
    pub role: &'a str,
}

/// An authentication session, as stored.
#[derive(Debug, Clone, Queryable)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub principal_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = sessions)]
pub struct NewSession<'a> {
    pub session_token: &'a str,
    pub principal_id: i64,
    pub created_at: &'a str,
    pub last_activity_at: &'a str,
    pub expires_at: &'a str,
}

/// A catalog service row.
#[derive(Debug, Clone, Queryable)]
pub struct ServiceRow {
    pub service_id: i64,
    pub name: String,
    pub category: String,
    pub fee: i32,
    pub requirements: String,
    pub is_active: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = services)]
pub struct NewService<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub fee: i32,
    pub requirements: &'a str,
    pub is_active: i32,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// An application row.
#[derive(Debug, Clone, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub application_number: String,
    pub citizen_id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub fee: i32,
    pub reason: String,
    pub status: String,
    pub remarks: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplication<'a> {
    pub application_number: &'a str,
    pub citizen_id: i64,
    pub service_id: i64,
    pub service_name: &'a str,
    pub fee: i32,
    pub reason: &'a str,
    pub status: &'a str,
    pub remarks: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// An activity log row.
#[derive(Debug, Clone, Queryable)]
pub struct ActivityRow {
    pub event_id: i64,
    pub actor_id: i64,
    pub actor_role: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub target: Option<String>,
    pub recorded_at: String,
}

#[derive(Insertable)]
#[diesel(table_name = activity_log)]
pub struct NewActivity<'a> {
    pub actor_id: i64,
    pub actor_role: &'a str,
    pub action_name: &'a str,
    pub action_details: Option<&'a str>,
    pub target: Option<&'a str>,
    pub recorded_at: &'a str,
}

fn fee_from_db(fee: i32, context: &str) -> Result<u32, PersistenceError> {
    u32::try_from(fee)
        .map_err(|_| PersistenceError::CorruptRecord(format!("negative fee on {context}")))
}

impl ApplicationRow {
    /// Converts the stored row into a domain [`Application`].
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if the stored status,
    /// application number, or fee fails validation.
    pub fn into_application(self) -> Result<Application, PersistenceError> {
        let status = ApplicationStatus::from_str(&self.status)?;
        let application_number = ApplicationNumber::parse(&self.application_number)?;
        let fee = fee_from_db(self.fee, "application")?;

        Ok(Application {
            id: self.application_id,
            application_number,
            citizen_id: self.citizen_id,
            service_id: self.service_id,
            service_name: self.service_name,
            fee,
            reason: self.reason,
            status,
            remarks: self.remarks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ServiceRow {
    /// Converts the stored row into a domain [`ServiceDescriptor`].
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if the stored fee is negative.
    pub fn into_descriptor(
        self,
    ) -> Result<gram_panchayat_domain::ServiceDescriptor, PersistenceError> {
        let fee = fee_from_db(self.fee, "service")?;

        Ok(gram_panchayat_domain::ServiceDescriptor {
            id: self.service_id,
            name: self.name,
            category: self.category,
            fee,
            requirements: self.requirements,
            is_active: self.is_active != 0,
        })
    }
}

impl ActivityRow {
    /// Converts the stored row into an [`ActivityEvent`].
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if the stored role is not
    /// a recognized role.
    pub fn into_event(self) -> Result<(i64, ActivityEvent), PersistenceError> {
        let role = Role::from_str(&self.actor_role)?;

        Ok((
            self.event_id,
            ActivityEvent::new(
                Actor::new(self.actor_id, role),
                Action::new(self.action_name, self.action_details),
                self.target,
                self.recorded_at,
            ),
        ))
    }
}
