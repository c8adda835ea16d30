//! Structured audit trail of advisory conditions and assignment decisions.
//!
//! Geofence warnings, synthesized sessions, stale auto-closes, assignments
//! and releases all leave a row here so reviewers can audit what the
//! engine waved through without blocking.

use crate::errors::AppResult;
use chrono::Utc;
use rusqlite::{Connection, params};

#[derive(Debug, Clone)]
pub struct AuditRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
    pub detail: String,
}

/// Append a row to the `audit_log` table.
pub fn audit(
    conn: &Connection,
    operation: &str,
    target: &str,
    message: &str,
    detail: Option<&serde_json::Value>,
) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();
    let detail_str = detail.map(|d| d.to_string()).unwrap_or_default();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO audit_log (date, operation, target, message, detail)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    stmt.execute(params![now, operation, target, message, detail_str])?;

    Ok(())
}

pub fn load_audit(conn: &Connection) -> AppResult<Vec<AuditRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, operation, target, message, detail
         FROM audit_log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(AuditRow {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
            detail: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
