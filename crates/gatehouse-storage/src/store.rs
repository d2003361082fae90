// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the Gatehouse collaborator traits.

use async_trait::async_trait;
use tracing::debug;

use gatehouse_config::model::StorageConfig;
use gatehouse_core::{
    AuditLog, AuditRecord, Directory, GatehouseError, GuestRecord, GuestStore, NewAuditRecord,
    NewGuest, UserProfile,
};

use crate::database::Database;
use crate::models::{NewProfile, ProfileRecord};
use crate::queries;

/// SQLite-backed store implementing [`Directory`], [`GuestStore`], and
/// [`AuditLog`].
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. One instance serves all three trait seams; callers
/// hold it behind `Arc` and coerce to whichever trait they need.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the database at the configured path and run migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, GatehouseError> {
        let db = Database::open_with_options(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite store opened");
        Ok(Self { db })
    }

    /// Wrap an already-open database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), GatehouseError> {
        self.db.close().await
    }

    // --- Administrative operations (CLI, tests) ---

    /// Insert a new directory profile.
    pub async fn insert_profile(&self, profile: &NewProfile) -> Result<(), GatehouseError> {
        queries::profiles::insert_profile(&self.db, profile).await
    }

    /// List all directory profiles.
    pub async fn list_profiles(&self) -> Result<Vec<ProfileRecord>, GatehouseError> {
        queries::profiles::list_profiles(&self.db).await
    }

    /// Update a profile's processing flag and daily ceiling.
    pub async fn set_email_limits(
        &self,
        user_id: &str,
        enabled: bool,
        max_daily: i64,
    ) -> Result<bool, GatehouseError> {
        queries::profiles::set_email_limits(&self.db, user_id, enabled, max_daily).await
    }

    /// Fetch an audit record by id.
    pub async fn get_audit(&self, id: i64) -> Result<Option<AuditRecord>, GatehouseError> {
        queries::audit::get_audit(&self.db, id).await
    }

    /// List guests invited by a user.
    pub async fn list_guests_for_inviter(
        &self,
        inviter_id: &str,
    ) -> Result<Vec<GuestRecord>, GatehouseError> {
        queries::guests::list_for_inviter(&self.db, inviter_id).await
    }
}

#[async_trait]
impl Directory for SqliteStore {
    async fn find_approved_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserProfile>, GatehouseError> {
        queries::profiles::find_approved_by_email(&self.db, email).await
    }
}

#[async_trait]
impl GuestStore for SqliteStore {
    async fn insert_guest(&self, guest: &NewGuest) -> Result<GuestRecord, GatehouseError> {
        queries::guests::insert_guest(&self.db, guest).await
    }
}

#[async_trait]
impl AuditLog for SqliteStore {
    async fn insert_audit(&self, record: &NewAuditRecord) -> Result<i64, GatehouseError> {
        queries::audit::insert_audit(&self.db, record).await
    }

    async fn mark_approved(&self, audit_id: i64, guest_id: i64) -> Result<(), GatehouseError> {
        queries::audit::mark_approved(&self.db, audit_id, guest_id).await
    }

    async fn count_since(&self, user_id: &str, since: &str) -> Result<i64, GatehouseError> {
        queries::audit::count_since(&self.db, user_id, since).await
    }
}
