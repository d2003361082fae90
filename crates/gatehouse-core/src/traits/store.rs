// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guest store and audit log traits.
//!
//! The pipeline's discipline over these is additive-only: inserts, plus one
//! targeted update of an audit record by id. Nothing here deletes or
//! bulk-mutates.

use async_trait::async_trait;

use crate::error::GatehouseError;
use crate::types::{GuestRecord, NewAuditRecord, NewGuest};

/// Insert access to the portal's guest table.
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Insert a guest and return the persisted row.
    async fn insert_guest(&self, guest: &NewGuest) -> Result<GuestRecord, GatehouseError>;
}

/// The per-email audit trail.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Insert a pending audit record, returning its id.
    async fn insert_audit(&self, record: &NewAuditRecord) -> Result<i64, GatehouseError>;

    /// Flip an audit record to `approved`, link the first created guest, and
    /// stamp the processing time.
    async fn mark_approved(&self, audit_id: i64, guest_id: i64) -> Result<(), GatehouseError>;

    /// Count audit records for a user created at or after `since`
    /// (an ISO 8601 timestamp string).
    async fn count_since(&self, user_id: &str, since: &str) -> Result<i64, GatehouseError>;
}
