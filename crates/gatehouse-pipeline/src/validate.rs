// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation and narrowing of raw model output.
//!
//! The model's JSON is untyped at the boundary, so this module takes a
//! loosely-typed `serde_json::Value` and narrows it field by field instead
//! of relying on strict schema deserialization. The function is total: any
//! input value produces an [`ExtractionResult`], never an error.

use chrono::{Local, NaiveDate};
use serde_json::Value;

use gatehouse_core::{ExtractedGuest, ExtractionResult};

use crate::normalize::{normalize_date_on, normalize_time};

/// Validate a raw model payload into an [`ExtractionResult`].
///
/// Incomplete guest entries (missing name, date, or arrival time after
/// normalization) are dropped and recorded in `errors`; the confidence
/// score is clamped into `[0, 1]`.
pub fn validate_extraction(raw: &Value) -> ExtractionResult {
    validate_extraction_on(raw, Local::now().date_naive())
}

/// [`validate_extraction`] with an explicit "today" for deterministic tests.
pub fn validate_extraction_on(raw: &Value, today: NaiveDate) -> ExtractionResult {
    let mut result = ExtractionResult {
        guests: Vec::new(),
        confidence_score: clamp_confidence(raw.get("confidence_score")),
        processing_notes: string_field(raw, "processing_notes"),
        errors: Vec::new(),
    };

    let Some(entries) = raw.get("guests").and_then(Value::as_array) else {
        result.errors.push("No valid guest array found".to_string());
        return result;
    };

    for entry in entries {
        let name = string_field(entry, "name");
        let visit_date = normalize_date_on(&string_field(entry, "visit_date"), today);
        let estimated_arrival = normalize_time(&string_field(entry, "estimated_arrival"));

        match (name.is_empty(), visit_date, estimated_arrival) {
            (false, Some(visit_date), Some(estimated_arrival)) => {
                result.guests.push(ExtractedGuest {
                    name,
                    visit_date,
                    estimated_arrival,
                    organization: string_field_or(entry, "organization", "Unknown"),
                    floor_access: string_field_or(entry, "floor_access", "Floor 1"),
                    purpose: string_field(entry, "purpose"),
                    notes: string_field(entry, "notes"),
                });
            }
            (name_missing, _, _) => {
                let label = if name_missing { "Unknown".to_string() } else { name };
                result
                    .errors
                    .push(format!("Incomplete guest data for: {label}"));
            }
        }
    }

    result
}

/// Clamp a raw confidence value into `[0, 1]`; absent or non-numeric is 0.
fn clamp_confidence(value: Option<&Value>) -> f64 {
    let confidence = value.and_then(Value::as_f64).unwrap_or(0.0);
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// A trimmed string field, empty when absent or not a string.
fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

/// A trimmed string field with a default for absent or empty values.
fn string_field_or(value: &Value, key: &str, default: &str) -> String {
    let field = string_field(value, key);
    if field.is_empty() { default.to_string() } else { field }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn complete_guest_is_kept_and_normalized() {
        let raw = json!({
            "guests": [{
                "name": "  Sarah Johnson  ",
                "visit_date": "tomorrow",
                "estimated_arrival": "2:30 pm",
                "organization": "TechCorp",
                "floor_access": "Floor 3"
            }],
            "confidence_score": 0.9,
            "processing_notes": "clear request"
        });

        let result = validate_extraction_on(&raw, today());
        assert_eq!(result.guests.len(), 1);
        let guest = &result.guests[0];
        assert_eq!(guest.name, "Sarah Johnson");
        assert_eq!(guest.visit_date, "2026-08-07");
        assert_eq!(guest.estimated_arrival, "14:30");
        assert_eq!(guest.organization, "TechCorp");
        assert_eq!(guest.floor_access, "Floor 3");
        assert_eq!(result.confidence_score, 0.9);
        assert_eq!(result.processing_notes, "clear request");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn defaults_fill_missing_organization_and_floor() {
        let raw = json!({
            "guests": [{
                "name": "Min Park",
                "visit_date": "2026-08-10",
                "estimated_arrival": "10:00"
            }],
            "confidence_score": 0.5
        });

        let result = validate_extraction_on(&raw, today());
        assert_eq!(result.guests[0].organization, "Unknown");
        assert_eq!(result.guests[0].floor_access, "Floor 1");
        assert_eq!(result.guests[0].purpose, "");
        assert_eq!(result.guests[0].notes, "");
    }

    #[test]
    fn incomplete_guests_are_dropped_and_recorded() {
        let raw = json!({
            "guests": [
                {"name": "", "visit_date": "2026-08-10", "estimated_arrival": "10:00"},
                {"name": "No Date", "estimated_arrival": "10:00"},
                {"name": "Bad Time", "visit_date": "2026-08-10", "estimated_arrival": "sometime"},
                {"name": "Kept Guest", "visit_date": "2026-08-10", "estimated_arrival": "10:00"}
            ],
            "confidence_score": 0.8
        });

        let result = validate_extraction_on(&raw, today());
        assert_eq!(result.guests.len(), 1);
        assert_eq!(result.guests[0].name, "Kept Guest");
        assert_eq!(
            result.errors,
            vec![
                "Incomplete guest data for: Unknown",
                "Incomplete guest data for: No Date",
                "Incomplete guest data for: Bad Time",
            ]
        );
    }

    #[test]
    fn missing_guest_array_is_an_error_not_a_panic() {
        for raw in [
            json!({"confidence_score": 0.7}),
            json!({"guests": "not an array"}),
            json!({"guests": 42}),
            json!(null),
            json!("plain string"),
        ] {
            let result = validate_extraction_on(&raw, today());
            assert!(result.guests.is_empty());
            assert_eq!(result.errors, vec!["No valid guest array found"]);
        }
    }

    #[test]
    fn confidence_is_always_clamped() {
        let cases = [
            (json!({"guests": [], "confidence_score": -0.5}), 0.0),
            (json!({"guests": [], "confidence_score": 1.7}), 1.0),
            (json!({"guests": [], "confidence_score": 0.42}), 0.42),
            (json!({"guests": [], "confidence_score": "high"}), 0.0),
            (json!({"guests": []}), 0.0),
        ];
        for (raw, expected) in cases {
            let result = validate_extraction_on(&raw, today());
            assert_eq!(result.confidence_score, expected, "raw: {raw}");
            assert!((0.0..=1.0).contains(&result.confidence_score));
        }
    }

    #[test]
    fn non_string_fields_are_treated_as_absent() {
        let raw = json!({
            "guests": [{
                "name": 123,
                "visit_date": "2026-08-10",
                "estimated_arrival": "10:00"
            }],
            "confidence_score": 0.8
        });
        let result = validate_extraction_on(&raw, today());
        assert!(result.guests.is_empty());
        assert_eq!(result.errors, vec!["Incomplete guest data for: Unknown"]);
    }
}
