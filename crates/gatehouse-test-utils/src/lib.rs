// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Gatehouse collaborator traits.
//!
//! These fakes let pipeline and gateway tests run without a database or a
//! model endpoint, with explicit failure injection for the error paths the
//! pipeline must swallow.

pub mod memory_store;
pub mod mock_provider;

pub use memory_store::{approved_profile, MemoryAuditLog, MemoryDirectory, MemoryGuestStore};
pub use mock_provider::MockCompletionProvider;
