// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage-side row types.
//!
//! The pipeline-facing types live in `gatehouse-core`; this module adds the
//! full directory row used by administrative operations, which carries the
//! approval state the pipeline never sees directly.

use gatehouse_core::{ApprovalStatus, UserProfile};

pub use gatehouse_core::types::{AuditRecord, GuestRecord, NewAuditRecord, NewGuest};

/// A full directory profile row, including approval state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub organization: String,
    pub authentication_status: ApprovalStatus,
    pub email_processing_enabled: bool,
    pub max_daily_email_processing: i64,
    pub created_at: String,
}

impl From<ProfileRecord> for UserProfile {
    fn from(record: ProfileRecord) -> Self {
        UserProfile {
            user_id: record.user_id,
            email: record.email,
            full_name: record.full_name,
            organization: record.organization,
            email_processing_enabled: record.email_processing_enabled,
            max_daily_email_processing: record.max_daily_email_processing,
        }
    }
}

/// Fields for inserting a new directory profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub organization: String,
    pub authentication_status: ApprovalStatus,
    pub email_processing_enabled: bool,
    pub max_daily_email_processing: i64,
}
