// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Gatehouse email-to-guest extraction pipeline.
//!
//! One inbound email flows through sender authorization, quota enforcement,
//! model extraction, guest creation, and audit logging, producing a single
//! structured [`gatehouse_core::ProcessReport`]. Stages communicate through
//! outcome values, never errors; the orchestrator's catch-all is the only
//! place a stray error can land.

pub mod authorize;
pub mod extract;
pub mod normalize;
pub mod processor;
pub mod quota;
pub mod validate;

pub use authorize::{extract_email_address, AuthOutcome, SenderAuthorizer};
pub use extract::GuestExtractor;
pub use normalize::{normalize_date, normalize_time};
pub use processor::EmailProcessor;
pub use quota::{QuotaDecision, QuotaGate};
pub use validate::validate_extraction;
