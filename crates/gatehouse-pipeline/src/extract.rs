// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-backed guest extraction.
//!
//! Sends one email's text to the completion provider with a fixed
//! instruction prompt, strips Markdown code fencing from the reply, parses
//! it as loose JSON, and hands it to the validator. Never propagates an
//! error to its caller: every failure becomes an empty [`ExtractionResult`]
//! carrying the failure message.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use gatehouse_core::{CompletionProvider, ExtractionResult};

use crate::validate::validate_extraction;

static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?").expect("fence pattern is valid"));
static BARE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\n?").expect("fence pattern is valid"));

/// Extracts structured guest data from email text via a completion provider.
pub struct GuestExtractor {
    provider: Arc<dyn CompletionProvider>,
}

impl GuestExtractor {
    /// Create an extractor over the given provider.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Extract guest entries from `email_content` sent by `sender_email`.
    pub async fn extract(&self, email_content: &str, sender_email: &str) -> ExtractionResult {
        let prompt = build_prompt(email_content, sender_email);

        let text = match self.provider.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "model call failed");
                return ExtractionResult::failure(e.to_string());
            }
        };

        let cleaned = strip_code_fences(&text);
        let raw: Value = match serde_json::from_str(&cleaned) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "model output was not valid JSON");
                return ExtractionResult::failure(e.to_string());
            }
        };

        let result = validate_extraction(&raw);
        debug!(
            guests = result.guests.len(),
            confidence = result.confidence_score,
            dropped = result.errors.len(),
            "extraction validated"
        );
        result
    }
}

/// Remove Markdown code-fence wrapping (```json ... ``` or ``` ... ```).
fn strip_code_fences(text: &str) -> String {
    let without_json = JSON_FENCE_RE.replace_all(text, "");
    BARE_FENCE_RE.replace_all(&without_json, "").trim().to_string()
}

/// The fixed instruction prompt embedding the email content and sender.
///
/// The expected JSON shape is a contract with the model, not a parser
/// schema; the validator tolerates deviations.
fn build_prompt(email_content: &str, sender_email: &str) -> String {
    format!(
        r#"You are a guest information extraction system for a visitor access portal.
Extract guest details from the provided email and return ONLY a valid JSON response.

IMPORTANT RULES:
1. Return ONLY valid JSON - no additional text or explanations
2. If no clear guest information is found, return an empty array
3. Be conservative with confidence scores (0.0 to 1.0)
4. Use reasonable defaults for missing information
5. Convert dates to YYYY-MM-DD format
6. Convert times to HH:MM format (24-hour)

Expected JSON format:
{{
  "guests": [
    {{
      "name": "Full Name",
      "visit_date": "YYYY-MM-DD",
      "estimated_arrival": "HH:MM",
      "organization": "Organization Name",
      "floor_access": "Floor X" or "Floors X, Y",
      "purpose": "Meeting purpose",
      "notes": "Additional notes"
    }}
  ],
  "confidence_score": 0.85,
  "processing_notes": "Brief explanation of extraction"
}}

EMAIL CONTENT TO PROCESS:
{email_content}

SENDER EMAIL: {sender_email}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_test_utils::MockCompletionProvider;

    fn sample_payload() -> String {
        r#"{
            "guests": [{
                "name": "Sarah Johnson",
                "visit_date": "2026-09-01",
                "estimated_arrival": "2:30 pm",
                "organization": "TechCorp",
                "floor_access": "Floor 3"
            }],
            "confidence_score": 0.9,
            "processing_notes": "explicit visit request"
        }"#
        .to_string()
    }

    #[test]
    fn prompt_embeds_email_and_sender() {
        let prompt = build_prompt("Bob visits tomorrow", "host@example.com");
        assert!(prompt.contains("EMAIL CONTENT TO PROCESS:\nBob visits tomorrow"));
        assert!(prompt.contains("SENDER EMAIL: host@example.com"));
        assert!(prompt.contains("confidence_score"));
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(
            strip_code_fences("```json\n{\"a\": 1}\n```"),
            "{\"a\": 1}"
        );
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn plain_json_response_is_extracted() {
        let provider = Arc::new(MockCompletionProvider::with_responses(vec![
            sample_payload(),
        ]));
        let extractor = GuestExtractor::new(provider);

        let result = extractor.extract("email body", "host@example.com").await;
        assert_eq!(result.guests.len(), 1);
        assert_eq!(result.guests[0].name, "Sarah Johnson");
        assert_eq!(result.guests[0].estimated_arrival, "14:30");
        assert_eq!(result.confidence_score, 0.9);
    }

    #[tokio::test]
    async fn fenced_json_parses_identically_to_plain() {
        let fenced = format!("```json\n{}\n```", sample_payload());
        let provider = Arc::new(MockCompletionProvider::with_responses(vec![
            sample_payload(),
            fenced,
        ]));
        let extractor = GuestExtractor::new(provider);

        let plain = extractor.extract("body", "a@b.com").await;
        let from_fenced = extractor.extract("body", "a@b.com").await;
        assert_eq!(plain, from_fenced);
    }

    #[tokio::test]
    async fn non_json_response_becomes_empty_failure_result() {
        let provider = Arc::new(MockCompletionProvider::with_responses(vec![
            "I could not find any guest information in this email.".to_string(),
        ]));
        let extractor = GuestExtractor::new(provider);

        let result = extractor.extract("body", "a@b.com").await;
        assert!(result.guests.is_empty());
        assert_eq!(result.confidence_score, 0.0);
        assert!(result.processing_notes.starts_with("Error processing email:"));
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn provider_error_becomes_empty_failure_result() {
        let provider = Arc::new(MockCompletionProvider::new());
        provider.add_error("model endpoint unreachable").await;
        let extractor = GuestExtractor::new(provider);

        let result = extractor.extract("body", "a@b.com").await;
        assert!(result.guests.is_empty());
        assert_eq!(result.confidence_score, 0.0);
        assert!(result.errors[0].contains("model endpoint unreachable"));
    }
}
