use crate::errors::{AppError, AppResult};
use crate::models::coordinate::Coordinate;
use crate::models::geofence_event::{EventKind, GeofenceEvent};
use crate::models::session::AttendanceSession;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn parse_stored_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.to_string())),
        )
    })
}

fn parse_stored_timestamp(ts: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(ts.to_string())),
            )
        })
}

/// Map a `sessions` row. The event log is loaded separately.
pub fn map_session_row(row: &Row) -> Result<AttendanceSession> {
    let date_str: String = row.get("date")?;
    let date = parse_stored_date(&date_str)?;

    let clock_in = row
        .get::<_, Option<String>>("clock_in")?
        .map(|s| parse_stored_timestamp(&s))
        .transpose()?;
    let clock_out = row
        .get::<_, Option<String>>("clock_out")?
        .map(|s| parse_stored_timestamp(&s))
        .transpose()?;

    Ok(AttendanceSession {
        id: row.get("id")?,
        manager_id: row.get("manager_id")?,
        date,
        clock_in,
        clock_out,
        events: Vec::new(),
        total_hours: row.get("total_hours")?,
        synthesized: row.get::<_, i32>("synthesized")? == 1,
        created_at: row.get("created_at")?,
    })
}

fn map_event_row(row: &Row) -> Result<GeofenceEvent> {
    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid event kind: {kind_str}"))),
        )
    })?;

    let at_str: String = row.get("at")?;
    let at = parse_stored_timestamp(&at_str)?;

    let lat: Option<f64> = row.get("lat")?;
    let lon: Option<f64> = row.get("lon")?;
    let coordinate = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    };

    let within_fence = row
        .get::<_, Option<i32>>("within_fence")?
        .map(|v| v == 1);

    Ok(GeofenceEvent {
        kind,
        at,
        coordinate,
        within_fence,
    })
}

/// Event log of one session, in insertion order.
pub fn load_events(conn: &Connection, session_id: i64) -> AppResult<Vec<GeofenceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT kind, at, lat, lon, within_fence FROM session_events
         WHERE session_id = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([session_id], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn with_events(conn: &Connection, mut session: AttendanceSession) -> AppResult<AttendanceSession> {
    session.events = load_events(conn, session.id)?;
    Ok(session)
}

pub fn load_session(
    conn: &Connection,
    manager_id: &str,
    date: NaiveDate,
) -> AppResult<Option<AttendanceSession>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sessions WHERE manager_id = ?1 AND date = ?2",
    )?;

    let session = stmt
        .query_row(
            params![manager_id, date.format("%Y-%m-%d").to_string()],
            map_session_row,
        )
        .optional()?;

    match session {
        Some(s) => Ok(Some(with_events(conn, s)?)),
        None => Ok(None),
    }
}

/// The manager's open session, wherever it is. The partial unique index
/// guarantees at most one row can match.
pub fn load_open_session(
    conn: &Connection,
    manager_id: &str,
) -> AppResult<Option<AttendanceSession>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sessions
         WHERE manager_id = ?1 AND clock_in IS NOT NULL AND clock_out IS NULL",
    )?;

    let session = stmt.query_row([manager_id], map_session_row).optional()?;

    match session {
        Some(s) => Ok(Some(with_events(conn, s)?)),
        None => Ok(None),
    }
}

pub fn load_sessions_in_range(
    conn: &Connection,
    manager_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceSession>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sessions
         WHERE manager_id = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY date ASC",
    )?;

    let rows = stmt.query_map(
        params![
            manager_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_session_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(with_events(conn, r?)?);
    }
    Ok(out)
}

pub fn insert_session(
    conn: &Connection,
    manager_id: &str,
    date: NaiveDate,
    clock_in: Option<DateTime<Utc>>,
    clock_out: Option<DateTime<Utc>>,
    total_hours: f64,
    synthesized: bool,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (manager_id, date, clock_in, clock_out, total_hours, synthesized, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            manager_id,
            date.format("%Y-%m-%d").to_string(),
            clock_in.map(|t| t.to_rfc3339()),
            clock_out.map(|t| t.to_rfc3339()),
            total_hours,
            if synthesized { 1 } else { 0 },
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite the clock stamps and recomputed hours of one session.
pub fn update_session_stamps(
    conn: &Connection,
    session_id: i64,
    clock_in: Option<DateTime<Utc>>,
    clock_out: Option<DateTime<Utc>>,
    total_hours: f64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions
         SET clock_in = ?1, clock_out = ?2, total_hours = ?3
         WHERE id = ?4",
        params![
            clock_in.map(|t| t.to_rfc3339()),
            clock_out.map(|t| t.to_rfc3339()),
            total_hours,
            session_id,
        ],
    )?;
    Ok(())
}

pub fn append_event(conn: &Connection, session_id: i64, ev: &GeofenceEvent) -> AppResult<()> {
    conn.execute(
        "INSERT INTO session_events (session_id, kind, at, lat, lon, within_fence, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            session_id,
            ev.kind.to_db_str(),
            ev.at.to_rfc3339(),
            ev.coordinate.map(|c| c.lat),
            ev.coordinate.map(|c| c.lon),
            ev.within_fence.map(|w| if w { 1 } else { 0 }),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}
