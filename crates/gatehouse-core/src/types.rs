// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Gatehouse workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Approval state of a directory profile.
///
/// Only `Approved` profiles may have email processing performed on their
/// behalf; the directory lookup filters on this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Denied,
}

/// Lifecycle state of an audit record.
///
/// Records are inserted `Pending` and flipped to `Approved` once at least
/// one guest was created from the extraction. `Rejected` is set by the
/// portal's review flow, never by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pending,
    Approved,
    Rejected,
}

/// A directory profile as returned by [`crate::Directory`] lookups.
///
/// Owned by the directory service; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub organization: String,
    /// Feature flag: whether inbound emails from this user are processed at all.
    pub email_processing_enabled: bool,
    /// Daily ceiling on processed emails for this user.
    pub max_daily_email_processing: i64,
}

/// A raw inbound email triple, supplied per invocation by the ingestion
/// source. Not persisted beyond audit logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEmail {
    pub from: String,
    pub subject: String,
    pub content: String,
}

/// One guest entry extracted from an email, after validation and
/// normalization.
///
/// An entry is only kept when `name`, `visit_date`, and `estimated_arrival`
/// are all non-empty; `visit_date` is an ISO 8601 calendar date and
/// `estimated_arrival` is 24-hour `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedGuest {
    pub name: String,
    pub visit_date: String,
    pub estimated_arrival: String,
    pub organization: String,
    pub floor_access: String,
    pub purpose: String,
    pub notes: String,
}

/// The validated outcome of one model extraction.
///
/// `confidence_score` is always clamped into `[0, 1]` regardless of what the
/// model returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub guests: Vec<ExtractedGuest>,
    pub confidence_score: f64,
    pub processing_notes: String,
    pub errors: Vec<String>,
}

impl ExtractionResult {
    /// An empty result describing an extraction-stage failure.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            guests: Vec::new(),
            confidence_score: 0.0,
            processing_notes: format!("Error processing email: {message}"),
            errors: vec![message],
        }
    }
}

/// A guest row to be inserted into the guest store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGuest {
    pub name: String,
    pub visit_date: String,
    pub estimated_arrival: String,
    pub arrival_status: bool,
    pub floor_access: String,
    pub inviter_id: String,
    pub organization: String,
    pub requester_email: String,
}

/// A persisted guest record.
///
/// `arrival_status` is later mutated by the portal's check-in flow, which is
/// outside this service; the pipeline only ever inserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub id: i64,
    pub name: String,
    pub visit_date: String,
    pub estimated_arrival: String,
    pub arrival_status: bool,
    pub floor_access: String,
    pub inviter_id: String,
    pub organization: String,
    pub requester_email: String,
    pub created_at: String,
}

/// An audit row to be inserted, one per processed email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuditRecord {
    pub user_id: String,
    pub sender_email: String,
    pub email_subject: String,
    pub original_email_content: String,
    /// The full extraction result, stored as JSON.
    pub extracted_data: ExtractionResult,
    pub confidence_score: f64,
    pub processing_errors: Vec<String>,
    pub ai_model_used: String,
}

/// A persisted audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    pub user_id: String,
    pub sender_email: String,
    pub email_subject: String,
    pub original_email_content: String,
    pub extracted_data: ExtractionResult,
    pub confidence_score: f64,
    pub processing_errors: Vec<String>,
    pub ai_model_used: String,
    pub processing_status: AuditStatus,
    pub guest_id: Option<i64>,
    pub processed_at: Option<String>,
    pub created_at: String,
}

/// The orchestrator's terminal result for one email.
///
/// This shape is the compatibility contract with existing callers (the
/// webhook and the mailbox poller both return it verbatim), so its field
/// names and nesting must not change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessReport {
    pub success: bool,
    pub message: String,
    pub data: Option<ProcessData>,
    pub errors: Vec<String>,
}

impl ProcessReport {
    /// A failed report with the given message and error strings.
    pub fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

/// Success payload of a [`ProcessReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessData {
    /// Audit record id, when the audit insert succeeded.
    pub record_id: Option<i64>,
    pub created_guests: Vec<GuestRecord>,
    pub extracted_guests: Vec<ExtractedGuest>,
    pub confidence_score: f64,
    pub processing_notes: String,
    pub user_info: UserInfo,
}

/// Inviter summary echoed back to the caller on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub organization: String,
    /// Daily allowance remaining after this email.
    pub remaining_daily: i64,
}
