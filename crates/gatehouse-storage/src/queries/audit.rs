// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email audit trail operations.
//!
//! The audit table is additive-only from the pipeline's side: one insert per
//! processed email plus one targeted update by id when guests were created.

use std::str::FromStr;

use gatehouse_core::{AuditRecord, AuditStatus, ExtractionResult, GatehouseError, NewAuditRecord};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

fn audit_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditRecord> {
    let extracted_json: String = row.get(5)?;
    let extracted_data: ExtractionResult =
        serde_json::from_str(&extracted_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let errors_json: Option<String> = row.get(7)?;
    let processing_errors = match errors_json {
        Some(json) => serde_json::from_str(&json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?,
        None => Vec::new(),
    };

    let status: String = row.get(9)?;
    Ok(AuditRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        sender_email: row.get(2)?,
        email_subject: row.get(3)?,
        original_email_content: row.get(4)?,
        extracted_data,
        confidence_score: row.get(6)?,
        processing_errors,
        ai_model_used: row.get(8)?,
        processing_status: AuditStatus::from_str(&status).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?,
        guest_id: row.get(10)?,
        processed_at: row.get(11)?,
        created_at: row.get(12)?,
    })
}

const AUDIT_COLUMNS: &str = "id, user_id, sender_email, email_subject, original_email_content,
     extracted_data, confidence_score, processing_errors, ai_model_used,
     processing_status, guest_id, processed_at, created_at";

/// Insert a pending audit record, returning its id.
pub async fn insert_audit(db: &Database, record: &NewAuditRecord) -> Result<i64, GatehouseError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| {
            let extracted_json = serde_json::to_string(&record.extracted_data)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            let errors_json = serde_json::to_string(&record.processing_errors)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            conn.execute(
                "INSERT INTO email_audit (user_id, sender_email, email_subject,
                     original_email_content, extracted_data, confidence_score,
                     processing_errors, ai_model_used, processing_status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending')",
                params![
                    record.user_id,
                    record.sender_email,
                    record.email_subject,
                    record.original_email_content,
                    extracted_json,
                    record.confidence_score,
                    errors_json,
                    record.ai_model_used,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Flip an audit record to `approved`, link the created guest, and stamp the
/// processing time.
pub async fn mark_approved(
    db: &Database,
    audit_id: i64,
    guest_id: i64,
) -> Result<(), GatehouseError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE email_audit
                 SET processing_status = 'approved', guest_id = ?1,
                     processed_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![guest_id, audit_id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Count audit records for a user created at or after `since`.
pub async fn count_since(
    db: &Database,
    user_id: &str,
    since: &str,
) -> Result<i64, GatehouseError> {
    let user_id = user_id.to_string();
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM email_audit WHERE user_id = ?1 AND created_at >= ?2",
                params![user_id, since],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch an audit record by id.
pub async fn get_audit(db: &Database, id: i64) -> Result<Option<AuditRecord>, GatehouseError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {AUDIT_COLUMNS} FROM email_audit WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], audit_from_row);
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
