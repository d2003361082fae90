// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Gatehouse guest registration service.
//!
//! This crate provides the foundational error type, domain types, and
//! collaborator traits used throughout the Gatehouse workspace. The
//! extraction pipeline depends only on the traits defined here; concrete
//! implementations live in the storage and provider crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GatehouseError;
pub use traits::{AuditLog, CompletionProvider, Directory, GuestStore};
pub use types::{
    ApprovalStatus, AuditRecord, AuditStatus, ExtractedGuest, ExtractionResult, GuestRecord,
    NewAuditRecord, NewGuest, ProcessData, ProcessReport, RawEmail, UserInfo, UserProfile,
};
