// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mailbox polling loop.
//!
//! Each tick lists unread candidate messages, skips ids already handled
//! this process lifetime, runs each remaining message through the
//! orchestrator, and clears the provider's unread flag only on success so
//! failed messages are retried on a later poll.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use gatehouse_config::model::MailboxConfig;
use gatehouse_core::{GatehouseError, RawEmail};
use gatehouse_pipeline::EmailProcessor;

use crate::Mailbox;

/// The in-memory seen-id cache is best-effort only: the provider's unread
/// flag is what actually prevents redelivery across restarts. Past this
/// cap the cache is dropped wholesale rather than growing unbounded.
const SEEN_CACHE_CAP: usize = 1024;

/// Polls a [`Mailbox`] and feeds messages to the [`EmailProcessor`].
pub struct MailboxPoller<M: Mailbox> {
    mailbox: M,
    processor: Arc<EmailProcessor>,
    config: MailboxConfig,
    seen: HashSet<String>,
}

impl<M: Mailbox> MailboxPoller<M> {
    /// Create a poller over the given mailbox and processor.
    pub fn new(mailbox: M, processor: Arc<EmailProcessor>, config: MailboxConfig) -> Self {
        Self {
            mailbox,
            processor,
            config,
            seen: HashSet::new(),
        }
    }

    /// Run the polling loop until the cancellation token is triggered.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            interval_secs = self.config.poll_interval_secs,
            batch = self.config.batch_size,
            "mailbox poller running"
        );
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.poll_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.poll_once().await {
                        Ok(processed) if processed > 0 => {
                            info!(processed, "mailbox poll complete");
                        }
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "mailbox poll failed"),
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping mailbox poller");
                    break;
                }
            }
        }
    }

    /// Poll the mailbox once. Returns the number of successfully processed
    /// messages.
    pub async fn poll_once(&mut self) -> Result<usize, GatehouseError> {
        let ids = self
            .mailbox
            .list_unread(&self.config.search_query, self.config.batch_size)
            .await?;
        debug!(candidates = ids.len(), "poll found candidate messages");

        let mut processed = 0;
        for id in ids {
            if self.seen.contains(&id) {
                continue;
            }

            let message = match self.mailbox.fetch(&id).await {
                Ok(message) => message,
                Err(e) => {
                    warn!(message_id = %id, error = %e, "failed to fetch message");
                    continue;
                }
            };

            if message.body.trim().is_empty() {
                debug!(message_id = %id, "no extractable body, skipping");
                continue;
            }

            let email = RawEmail {
                from: message.from,
                subject: message.subject,
                content: message.body,
            };
            let report = self.processor.process(&email).await;

            if report.success {
                self.remember(id.clone());
                if let Err(e) = self.mailbox.mark_read(&id).await {
                    warn!(message_id = %id, error = %e, "failed to clear unread flag");
                }
                processed += 1;
            } else {
                info!(
                    message_id = %id,
                    outcome = %report.message,
                    "message not processed"
                );
            }
        }

        Ok(processed)
    }

    fn remember(&mut self, id: String) {
        if self.seen.len() >= SEEN_CACHE_CAP {
            self.seen.clear();
        }
        self.seen.insert(id);
    }
}
