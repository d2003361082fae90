// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The email processing orchestrator.
//!
//! Sequences authorization, quota, extraction, guest creation, and auditing
//! for one email, producing a single terminal [`ProcessReport`]. Each stage
//! runs once, forward only; there is no retry. This is the one boundary
//! where any remaining failure is guaranteed to surface as a structured
//! result rather than an error.

use std::sync::Arc;

use tracing::{error, info, warn};

use gatehouse_core::{
    AuditLog, CompletionProvider, Directory, GatehouseError, GuestStore, NewAuditRecord, NewGuest,
    ProcessData, ProcessReport, RawEmail, UserInfo,
};

use crate::authorize::{AuthOutcome, SenderAuthorizer};
use crate::extract::GuestExtractor;
use crate::quota::QuotaGate;

/// The orchestrator for the email-to-guest pipeline.
///
/// All collaborators are injected, so tests can substitute fakes for the
/// directory, stores, and model endpoint.
pub struct EmailProcessor {
    authorizer: SenderAuthorizer,
    quota: QuotaGate,
    extractor: GuestExtractor,
    guests: Arc<dyn GuestStore>,
    audit: Arc<dyn AuditLog>,
    model_label: String,
}

impl EmailProcessor {
    /// Assemble a processor from its collaborators.
    ///
    /// `model_label` is recorded on audit rows (e.g. "gemini-1.5-flash").
    pub fn new(
        directory: Arc<dyn Directory>,
        guests: Arc<dyn GuestStore>,
        audit: Arc<dyn AuditLog>,
        provider: Arc<dyn CompletionProvider>,
        model_label: impl Into<String>,
    ) -> Self {
        Self {
            authorizer: SenderAuthorizer::new(directory),
            quota: QuotaGate::new(Arc::clone(&audit)),
            extractor: GuestExtractor::new(provider),
            guests,
            audit,
            model_label: model_label.into(),
        }
    }

    /// Process one inbound email to completion.
    ///
    /// Never returns an error: anything the stages did not already convert
    /// is caught here and reported as a generic failure.
    pub async fn process(&self, email: &RawEmail) -> ProcessReport {
        match self.run(email).await {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, from = %email.from, "unexpected processing error");
                ProcessReport::failed("Unexpected processing error", vec![e.to_string()])
            }
        }
    }

    async fn run(&self, email: &RawEmail) -> Result<ProcessReport, GatehouseError> {
        // 1. Authorize the sender.
        let profile = match self.authorizer.authorize(&email.from).await {
            AuthOutcome::Authorized(profile) => profile,
            AuthOutcome::Rejected(reason) => {
                info!(from = %email.from, reason = %reason, "sender rejected");
                return Ok(ProcessReport::failed("Unauthorized sender", vec![reason]));
            }
        };

        // 2. Check the daily quota.
        let quota = self
            .quota
            .check(&profile.user_id, profile.max_daily_email_processing)
            .await;
        if !quota.can_process {
            info!(
                user_id = %profile.user_id,
                current = quota.current_count,
                limit = quota.daily_limit,
                "daily limit reached"
            );
            return Ok(ProcessReport::failed(
                format!(
                    "Daily limit reached ({}/{})",
                    quota.current_count, quota.daily_limit
                ),
                vec![quota
                    .error
                    .unwrap_or_else(|| "Daily processing limit exceeded".to_string())],
            ));
        }

        // 3. Extract guest data from the email body.
        let extraction = self.extractor.extract(&email.content, &email.from).await;
        if extraction.guests.is_empty() {
            info!(from = %email.from, "no valid guests extracted");
            return Ok(ProcessReport::failed(
                "Unable to extract guest details",
                vec!["No valid guest information found in email".to_string()],
            ));
        }

        // 4. Create guests. A single failed insert is recorded and skipped;
        // one malformed entry must not block its siblings.
        let mut errors = extraction.errors.clone();
        let mut created = Vec::new();
        for guest in &extraction.guests {
            let new_guest = NewGuest {
                name: guest.name.clone(),
                visit_date: guest.visit_date.clone(),
                estimated_arrival: guest.estimated_arrival.clone(),
                arrival_status: false,
                floor_access: guest.floor_access.clone(),
                inviter_id: profile.user_id.clone(),
                organization: guest.organization.clone(),
                requester_email: email.from.clone(),
            };
            match self.guests.insert_guest(&new_guest).await {
                Ok(record) => {
                    info!(guest = %record.name, guest_id = record.id, "guest created");
                    created.push(record);
                }
                Err(e) => {
                    error!(guest = %guest.name, error = %e, "failed to create guest");
                    errors.push(format!("Failed to create guest: {} - {}", guest.name, e));
                }
            }
        }

        if created.is_empty() {
            return Ok(ProcessReport {
                success: false,
                message: "Failed to create any guests".to_string(),
                data: None,
                errors,
            });
        }

        // 5. Audit trail: best-effort. Its failure is logged but never flips
        // an otherwise-successful result.
        let audit_record = NewAuditRecord {
            user_id: profile.user_id.clone(),
            sender_email: profile.email.clone(),
            email_subject: email.subject.clone(),
            original_email_content: email.content.clone(),
            extracted_data: extraction.clone(),
            confidence_score: extraction.confidence_score,
            processing_errors: extraction.errors.clone(),
            ai_model_used: self.model_label.clone(),
        };
        let record_id = match self.audit.insert_audit(&audit_record).await {
            Ok(id) => {
                if let Err(e) = self.audit.mark_approved(id, created[0].id).await {
                    warn!(audit_id = id, error = %e, "failed to update audit record");
                }
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "failed to write audit record");
                None
            }
        };

        // 6. Done.
        let report = ProcessReport {
            success: true,
            message: format!(
                "Successfully created {} guest(s) from email with {:.1}% confidence",
                created.len(),
                extraction.confidence_score * 100.0
            ),
            data: Some(ProcessData {
                record_id,
                extracted_guests: extraction.guests.clone(),
                confidence_score: extraction.confidence_score,
                processing_notes: extraction.processing_notes.clone(),
                user_info: UserInfo {
                    name: profile.full_name.clone(),
                    organization: profile.organization.clone(),
                    remaining_daily: quota.remaining - 1,
                },
                created_guests: created,
            }),
            errors,
        };
        Ok(report)
    }
}
