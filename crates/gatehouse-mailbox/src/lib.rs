// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mailbox ingestion source for the Gatehouse pipeline.
//!
//! Polls a mailbox provider for unread candidate emails, hands each one to
//! the [`gatehouse_pipeline::EmailProcessor`], and marks messages read once
//! they produced a successful result so the provider does not redeliver
//! them. Deduplication by message id is a best-effort in-memory cache; the
//! provider-side unread flag is the source of truth.

pub mod gmail;
pub mod mime;
pub mod poller;

use async_trait::async_trait;

use gatehouse_core::GatehouseError;

pub use gmail::GmailMailbox;
pub use poller::MailboxPoller;

/// A fetched mailbox message, reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    /// Provider-assigned message identifier.
    pub id: String,
    /// Raw "From" header value.
    pub from: String,
    /// Subject header value.
    pub subject: String,
    /// Extracted text body (plain text preferred over HTML).
    pub body: String,
}

/// A mailbox provider the poller can drain.
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// List unread message ids matching `query`, at most `max_results`.
    async fn list_unread(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, GatehouseError>;

    /// Fetch one message with its headers and decoded body.
    async fn fetch(&self, id: &str) -> Result<MailMessage, GatehouseError>;

    /// Clear the provider's unread flag for a message.
    async fn mark_read(&self, id: &str) -> Result<(), GatehouseError>;
}
