// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily processing quota enforcement.
//!
//! Counts a user's audit records since the start of the host-local calendar
//! day against their configured ceiling. A failed count blocks processing
//! (fails closed) rather than letting it through.

use std::sync::Arc;

use chrono::Local;
use tracing::debug;

use gatehouse_core::AuditLog;

/// Outcome of a quota check.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaDecision {
    pub can_process: bool,
    pub current_count: i64,
    pub daily_limit: i64,
    pub remaining: i64,
    /// Set when the count query itself failed; processing is blocked.
    pub error: Option<String>,
}

/// Enforces per-user daily processing ceilings.
pub struct QuotaGate {
    audit: Arc<dyn AuditLog>,
}

impl QuotaGate {
    /// Create a quota gate over the given audit log.
    pub fn new(audit: Arc<dyn AuditLog>) -> Self {
        Self { audit }
    }

    /// Check whether `user_id` may process another email today.
    pub async fn check(&self, user_id: &str, max_daily: i64) -> QuotaDecision {
        let since = format!("{}T00:00:00", Local::now().date_naive().format("%Y-%m-%d"));

        match self.audit.count_since(user_id, &since).await {
            Ok(count) => {
                let decision = QuotaDecision {
                    can_process: count < max_daily,
                    current_count: count,
                    daily_limit: max_daily,
                    remaining: (max_daily - count).max(0),
                    error: None,
                };
                debug!(
                    user_id,
                    count, max_daily, decision.can_process, "quota checked"
                );
                decision
            }
            Err(e) => QuotaDecision {
                can_process: false,
                current_count: 0,
                daily_limit: max_daily,
                remaining: 0,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_test_utils::MemoryAuditLog;

    #[tokio::test]
    async fn under_limit_allows_processing() {
        let audit = Arc::new(MemoryAuditLog::new());
        audit.set_count(3).await;
        let gate = QuotaGate::new(audit);

        let decision = gate.check("u-1", 10).await;
        assert!(decision.can_process);
        assert_eq!(decision.current_count, 3);
        assert_eq!(decision.daily_limit, 10);
        assert_eq!(decision.remaining, 7);
        assert!(decision.error.is_none());
    }

    #[tokio::test]
    async fn at_limit_blocks_with_zero_remaining() {
        let audit = Arc::new(MemoryAuditLog::new());
        audit.set_count(10).await;
        let gate = QuotaGate::new(audit);

        let decision = gate.check("u-1", 10).await;
        assert!(!decision.can_process);
        assert_eq!(decision.remaining, 0);
    }

    #[tokio::test]
    async fn one_below_limit_leaves_one_remaining() {
        let audit = Arc::new(MemoryAuditLog::new());
        audit.set_count(9).await;
        let gate = QuotaGate::new(audit);

        let decision = gate.check("u-1", 10).await;
        assert!(decision.can_process);
        assert_eq!(decision.remaining, 1);
    }

    #[tokio::test]
    async fn over_limit_clamps_remaining_to_zero() {
        let audit = Arc::new(MemoryAuditLog::new());
        audit.set_count(14).await;
        let gate = QuotaGate::new(audit);

        let decision = gate.check("u-1", 10).await;
        assert!(!decision.can_process);
        assert_eq!(decision.remaining, 0);
    }

    #[tokio::test]
    async fn count_failure_fails_closed() {
        let audit = Arc::new(MemoryAuditLog::new());
        audit.fail_counts();
        let gate = QuotaGate::new(audit);

        let decision = gate.check("u-1", 10).await;
        assert!(!decision.can_process);
        assert!(decision.error.is_some());
    }
}
