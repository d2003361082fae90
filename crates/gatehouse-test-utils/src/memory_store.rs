// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory fakes for the storage-facing collaborator traits.
//!
//! Each fake supports failure injection so pipeline tests can exercise the
//! fail-closed and partial-failure paths without a database.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use gatehouse_core::{
    AuditLog, Directory, GatehouseError, GuestRecord, GuestStore, NewAuditRecord, NewGuest,
    UserProfile,
};

fn storage_error(message: &str) -> GatehouseError {
    GatehouseError::Storage {
        source: message.to_string().into(),
    }
}

/// In-memory [`Directory`] fake.
///
/// Holds approved profiles only; an unapproved sender is simply absent,
/// matching the filtered lookup the real directory performs.
#[derive(Default)]
pub struct MemoryDirectory {
    profiles: Mutex<Vec<UserProfile>>,
    fail: AtomicBool,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load approved profiles.
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every lookup fail with a storage error.
    pub fn fail_lookups(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_approved_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserProfile>, GatehouseError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(storage_error("directory unavailable"));
        }
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .find(|p| p.email == email)
            .cloned())
    }
}

/// In-memory [`GuestStore`] fake with per-name failure injection.
#[derive(Default)]
pub struct MemoryGuestStore {
    guests: Mutex<Vec<GuestRecord>>,
    failing_names: Mutex<HashSet<String>>,
    fail_all: AtomicBool,
    next_id: AtomicI64,
}

impl MemoryGuestStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Make insertion fail for a specific guest name.
    pub async fn fail_for_name(&self, name: impl Into<String>) {
        self.failing_names.lock().await.insert(name.into());
    }

    /// Make every insertion fail.
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// Guests successfully inserted so far.
    pub async fn inserted(&self) -> Vec<GuestRecord> {
        self.guests.lock().await.clone()
    }
}

#[async_trait]
impl GuestStore for MemoryGuestStore {
    async fn insert_guest(&self, guest: &NewGuest) -> Result<GuestRecord, GatehouseError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(storage_error("guest store unavailable"));
        }
        if self.failing_names.lock().await.contains(&guest.name) {
            return Err(storage_error("constraint violation"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = GuestRecord {
            id,
            name: guest.name.clone(),
            visit_date: guest.visit_date.clone(),
            estimated_arrival: guest.estimated_arrival.clone(),
            arrival_status: guest.arrival_status,
            floor_access: guest.floor_access.clone(),
            inviter_id: guest.inviter_id.clone(),
            organization: guest.organization.clone(),
            requester_email: guest.requester_email.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.guests.lock().await.push(record.clone());
        Ok(record)
    }
}

/// A stored audit entry inside [`MemoryAuditLog`].
#[derive(Debug, Clone)]
pub struct StoredAudit {
    pub id: i64,
    pub record: NewAuditRecord,
    pub approved_guest_id: Option<i64>,
}

/// In-memory [`AuditLog`] fake.
///
/// `count_since` ignores the boundary and reports either a preset count (for
/// quota tests) or the number of stored records for the user.
#[derive(Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<StoredAudit>>,
    preset_count: Mutex<Option<i64>>,
    fail_insert: AtomicBool,
    fail_count: AtomicBool,
    next_id: AtomicI64,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    /// Fix the value `count_since` reports.
    pub async fn set_count(&self, count: i64) {
        *self.preset_count.lock().await = Some(count);
    }

    /// Make `count_since` fail with a storage error.
    pub fn fail_counts(&self) {
        self.fail_count.store(true, Ordering::SeqCst);
    }

    /// Make `insert_audit` fail with a storage error.
    pub fn fail_inserts(&self) {
        self.fail_insert.store(true, Ordering::SeqCst);
    }

    /// Audit entries stored so far.
    pub async fn entries(&self) -> Vec<StoredAudit> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl AuditLog for MemoryAuditLog {
    async fn insert_audit(&self, record: &NewAuditRecord) -> Result<i64, GatehouseError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(storage_error("audit log unavailable"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records.lock().await.push(StoredAudit {
            id,
            record: record.clone(),
            approved_guest_id: None,
        });
        Ok(id)
    }

    async fn mark_approved(&self, audit_id: i64, guest_id: i64) -> Result<(), GatehouseError> {
        let mut records = self.records.lock().await;
        match records.iter_mut().find(|r| r.id == audit_id) {
            Some(entry) => {
                entry.approved_guest_id = Some(guest_id);
                Ok(())
            }
            None => Err(storage_error("no such audit record")),
        }
    }

    async fn count_since(&self, user_id: &str, _since: &str) -> Result<i64, GatehouseError> {
        if self.fail_count.load(Ordering::SeqCst) {
            return Err(storage_error("count query failed"));
        }
        if let Some(count) = *self.preset_count.lock().await {
            return Ok(count);
        }
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.record.user_id == user_id)
            .count() as i64)
    }
}

/// An approved directory profile for `email`, processing enabled, limit 10.
pub fn approved_profile(email: &str) -> UserProfile {
    UserProfile {
        user_id: format!("user-{email}"),
        email: email.to_string(),
        full_name: "Approved Inviter".to_string(),
        organization: "Research".to_string(),
        email_processing_enabled: true,
        max_daily_email_processing: 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_returns_only_known_profiles() {
        let directory =
            MemoryDirectory::with_profiles(vec![approved_profile("known@example.com")]);
        assert!(directory
            .find_approved_by_email("known@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(directory
            .find_approved_by_email("unknown@example.com")
            .await
            .unwrap()
            .is_none());

        directory.fail_lookups();
        assert!(directory
            .find_approved_by_email("known@example.com")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn guest_store_fails_selectively() {
        let store = MemoryGuestStore::new();
        store.fail_for_name("Bad Guest").await;

        let mut guest = NewGuest {
            name: "Good Guest".to_string(),
            visit_date: "2026-08-07".to_string(),
            estimated_arrival: "10:00".to_string(),
            arrival_status: false,
            floor_access: "Floor 1".to_string(),
            inviter_id: "u-1".to_string(),
            organization: "Unknown".to_string(),
            requester_email: "a@b.com".to_string(),
        };
        assert!(store.insert_guest(&guest).await.is_ok());

        guest.name = "Bad Guest".to_string();
        assert!(store.insert_guest(&guest).await.is_err());

        assert_eq!(store.inserted().await.len(), 1);
    }

    #[tokio::test]
    async fn audit_log_preset_count_overrides_records() {
        let log = MemoryAuditLog::new();
        assert_eq!(log.count_since("u-1", "ignored").await.unwrap(), 0);

        log.set_count(7).await;
        assert_eq!(log.count_since("u-1", "ignored").await.unwrap(), 7);

        log.fail_counts();
        assert!(log.count_since("u-1", "ignored").await.is_err());
    }
}
