// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guest record operations.

use gatehouse_core::{GatehouseError, GuestRecord, NewGuest};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

fn guest_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GuestRecord> {
    Ok(GuestRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        visit_date: row.get(2)?,
        estimated_arrival: row.get(3)?,
        arrival_status: row.get(4)?,
        floor_access: row.get(5)?,
        inviter_id: row.get(6)?,
        organization: row.get(7)?,
        requester_email: row.get(8)?,
        created_at: row.get(9)?,
    })
}

const GUEST_COLUMNS: &str = "id, name, visit_date, estimated_arrival, arrival_status,
     floor_access, inviter_id, organization, requester_email, created_at";

/// Insert a guest and return the persisted row.
pub async fn insert_guest(db: &Database, guest: &NewGuest) -> Result<GuestRecord, GatehouseError> {
    let guest = guest.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO guests (name, visit_date, estimated_arrival, arrival_status,
                     floor_access, inviter_id, organization, requester_email)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    guest.name,
                    guest.visit_date,
                    guest.estimated_arrival,
                    guest.arrival_status,
                    guest.floor_access,
                    guest.inviter_id,
                    guest.organization,
                    guest.requester_email,
                ],
            )?;
            let id = conn.last_insert_rowid();
            let mut stmt =
                conn.prepare(&format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = ?1"))?;
            let record = stmt.query_row(params![id], guest_from_row)?;
            Ok(record)
        })
        .await
        .map_err(map_tr_err)
}

/// List guests invited by a user, newest first.
pub async fn list_for_inviter(
    db: &Database,
    inviter_id: &str,
) -> Result<Vec<GuestRecord>, GatehouseError> {
    let inviter_id = inviter_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {GUEST_COLUMNS} FROM guests
                 WHERE inviter_id = ?1 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![inviter_id], guest_from_row)?;
            let mut guests = Vec::new();
            for row in rows {
                guests.push(row?);
            }
            Ok(guests)
        })
        .await
        .map_err(map_tr_err)
}
