// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sender authorization against the user directory.
//!
//! Resolves a raw "From" header to a bare address, looks it up in the
//! directory, and enforces approval plus the per-user processing flag.
//! Lookup failures are converted into a rejection, never propagated.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use gatehouse_core::{Directory, UserProfile};

static ANGLE_ADDR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]+)>").expect("address pattern is valid"));
static BARE_ADDR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("address pattern is valid")
});

/// Outcome of sender authorization.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Sender resolved to an approved profile with processing enabled.
    Authorized(UserProfile),
    /// Sender rejected, with the reason reported to the caller.
    Rejected(String),
}

/// Authorizes raw "From" headers against a [`Directory`].
pub struct SenderAuthorizer {
    directory: Arc<dyn Directory>,
}

impl SenderAuthorizer {
    /// Create an authorizer over the given directory.
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Authorize the sender of an email by its raw "From" header.
    pub async fn authorize(&self, raw_from: &str) -> AuthOutcome {
        let email = extract_email_address(raw_from);
        debug!(from = raw_from, resolved = %email, "authorizing sender");

        match self.directory.find_approved_by_email(&email).await {
            Ok(Some(profile)) if !profile.email_processing_enabled => {
                AuthOutcome::Rejected("Email processing disabled for this user".to_string())
            }
            Ok(Some(profile)) => AuthOutcome::Authorized(profile),
            Ok(None) => {
                AuthOutcome::Rejected("Email not found or user not approved".to_string())
            }
            Err(e) => AuthOutcome::Rejected(format!("Database error: {e}")),
        }
    }
}

/// Extract a bare email address from `"Display Name <addr>"` or a bare
/// address; falls back to the trimmed raw string when nothing matches.
pub fn extract_email_address(raw: &str) -> String {
    if let Some(captures) = ANGLE_ADDR_RE.captures(raw) {
        return captures[1].to_string();
    }
    if let Some(matched) = BARE_ADDR_RE.find(raw) {
        return matched.as_str().to_string();
    }
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_test_utils::{approved_profile, MemoryDirectory};

    #[test]
    fn address_extraction_handles_common_shapes() {
        assert_eq!(
            extract_email_address("Jordan Reyes <jordan@example.com>"),
            "jordan@example.com"
        );
        assert_eq!(
            extract_email_address("jordan@example.com"),
            "jordan@example.com"
        );
        assert_eq!(
            extract_email_address("reply to jordan@example.com please"),
            "jordan@example.com"
        );
        // Best-effort fallback for unparseable headers.
        assert_eq!(extract_email_address("  not-an-address  "), "not-an-address");
    }

    #[tokio::test]
    async fn approved_sender_with_display_name_is_authorized() {
        let directory = Arc::new(MemoryDirectory::with_profiles(vec![approved_profile(
            "jordan@example.com",
        )]));
        let authorizer = SenderAuthorizer::new(directory);

        let outcome = authorizer
            .authorize("Jordan Reyes <jordan@example.com>")
            .await;
        match outcome {
            AuthOutcome::Authorized(profile) => {
                assert_eq!(profile.email, "jordan@example.com");
            }
            other => panic!("expected Authorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_sender_is_rejected() {
        let directory = Arc::new(MemoryDirectory::new());
        let authorizer = SenderAuthorizer::new(directory);

        let outcome = authorizer.authorize("stranger@example.com").await;
        assert_eq!(
            outcome,
            AuthOutcome::Rejected("Email not found or user not approved".to_string())
        );
    }

    #[tokio::test]
    async fn disabled_processing_flag_is_rejected() {
        let mut profile = approved_profile("muted@example.com");
        profile.email_processing_enabled = false;
        let directory = Arc::new(MemoryDirectory::with_profiles(vec![profile]));
        let authorizer = SenderAuthorizer::new(directory);

        let outcome = authorizer.authorize("muted@example.com").await;
        assert_eq!(
            outcome,
            AuthOutcome::Rejected("Email processing disabled for this user".to_string())
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_rejected_not_propagated() {
        let directory = Arc::new(MemoryDirectory::with_profiles(vec![approved_profile(
            "jordan@example.com",
        )]));
        directory.fail_lookups();
        let authorizer = SenderAuthorizer::new(directory);

        let outcome = authorizer.authorize("jordan@example.com").await;
        match outcome {
            AuthOutcome::Rejected(reason) => {
                assert!(reason.starts_with("Database error:"), "got: {reason}");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
