// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory profile operations.

use std::str::FromStr;

use gatehouse_core::{ApprovalStatus, GatehouseError, UserProfile};
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::{NewProfile, ProfileRecord};

fn profile_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProfileRecord> {
    let status: String = row.get(4)?;
    Ok(ProfileRecord {
        user_id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        organization: row.get(3)?,
        authentication_status: ApprovalStatus::from_str(&status).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        email_processing_enabled: row.get(5)?,
        max_daily_email_processing: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const PROFILE_COLUMNS: &str = "user_id, email, full_name, organization, authentication_status,
     email_processing_enabled, max_daily_email_processing, created_at";

/// Look up an approved profile by exact email match.
///
/// Returns `None` when no row matches or the matching row is not `Approved`.
pub async fn find_approved_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<UserProfile>, GatehouseError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles
                 WHERE email = ?1 AND authentication_status = 'Approved'"
            ))?;
            let result = stmt.query_row(params![email], profile_from_row);
            match result {
                Ok(record) => Ok(Some(UserProfile::from(record))),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a new directory profile.
pub async fn insert_profile(db: &Database, profile: &NewProfile) -> Result<(), GatehouseError> {
    let profile = profile.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO profiles (user_id, email, full_name, organization,
                     authentication_status, email_processing_enabled, max_daily_email_processing)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    profile.user_id,
                    profile.email,
                    profile.full_name,
                    profile.organization,
                    profile.authentication_status.to_string(),
                    profile.email_processing_enabled,
                    profile.max_daily_email_processing,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// List all directory profiles, newest first.
pub async fn list_profiles(db: &Database) -> Result<Vec<ProfileRecord>, GatehouseError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
            ))?;
            let rows = stmt.query_map([], profile_from_row)?;
            let mut profiles = Vec::new();
            for row in rows {
                profiles.push(row?);
            }
            Ok(profiles)
        })
        .await
        .map_err(map_tr_err)
}

/// Update a profile's email-processing flag and daily ceiling.
///
/// Returns `false` when no profile has the given id.
pub async fn set_email_limits(
    db: &Database,
    user_id: &str,
    enabled: bool,
    max_daily: i64,
) -> Result<bool, GatehouseError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let updated = conn.execute(
                "UPDATE profiles
                 SET email_processing_enabled = ?1, max_daily_email_processing = ?2
                 WHERE user_id = ?3",
                params![enabled, max_daily, user_id],
            )?;
            Ok(updated > 0)
        })
        .await
        .map_err(map_tr_err)
}
