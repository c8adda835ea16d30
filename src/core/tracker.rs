//! Attendance session state machine.
//!
//! One record per (manager, date), driven through the explicit
//! NoSession → Open → Closed → Open … transitions. Both operations run
//! inside a single ledger transaction supplied by the caller, so two
//! concurrent clock-ins serialize to exactly one logical transition.

use crate::db::audit::audit;
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::models::coordinate::Coordinate;
use crate::models::geofence_event::{EventKind, GeofenceEvent};
use crate::models::session::{AttendanceSession, SessionState, state_of};
use crate::utils::time::hours_between;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde_json::json;

/// Result of a clock operation. Advisory conditions ride along with the
/// success value instead of being raised as errors: a field manager must
/// always be able to record presence, bad GPS fix or not.
#[derive(Debug, Clone)]
pub struct ClockOutcome {
    pub session: AttendanceSession,
    pub geofence_warning: bool,
    pub synthesized: bool,
}

fn reload(conn: &Connection, manager_id: &str, date: NaiveDate) -> AppResult<AttendanceSession> {
    sessions::load_session(conn, manager_id, date)?
        .ok_or_else(|| AppError::Other(format!("session vanished for {manager_id} {date}")))
}

/// Close a stale open session left over from a previous day, at its own
/// clock-in instant. Keeps the single-open-session invariant without
/// inventing worked hours; the record stays flagged in the audit log.
fn autoclose_stale(conn: &Connection, stale: &AttendanceSession) -> AppResult<()> {
    sessions::update_session_stamps(conn, stale.id, stale.clock_in, stale.clock_in, 0.0)?;
    audit(
        conn,
        "stale_autoclose",
        &stale.manager_id,
        &format!("auto-closed open session from {}", stale.date_str()),
        Some(&json!({ "date": stale.date_str() })),
    )?;
    Ok(())
}

fn audit_geofence_flag(
    conn: &Connection,
    manager_id: &str,
    date: NaiveDate,
    kind: EventKind,
    coordinate: Option<Coordinate>,
) -> AppResult<()> {
    audit(
        conn,
        "geofence_flag",
        manager_id,
        &format!(
            "{} recorded outside the project work area",
            kind.to_db_str()
        ),
        Some(&json!({
            "date": date.format("%Y-%m-%d").to_string(),
            "lat": coordinate.map(|c| c.lat),
            "lon": coordinate.map(|c| c.lon),
        })),
    )?;
    Ok(())
}

/// Clock-in for (manager, date).
///
/// First clock-in of the day creates the session; a clock-in after a close
/// re-opens the same record; a clock-in while already open is a no-op.
/// A failed geofence check never blocks the operation — it is surfaced on
/// the outcome and recorded for review.
pub fn clock_in(
    conn: &Connection,
    manager_id: &str,
    date: NaiveDate,
    at: DateTime<Utc>,
    coordinate: Option<Coordinate>,
    within_fence: Option<bool>,
) -> AppResult<ClockOutcome> {
    let geofence_warning = within_fence == Some(false);

    // A still-open session from an earlier day would violate the
    // single-open-session invariant once today opens.
    if let Some(stale) = sessions::load_open_session(conn, manager_id)? {
        if stale.date != date {
            autoclose_stale(conn, &stale)?;
        }
    }

    let existing = sessions::load_session(conn, manager_id, date)?;

    match (state_of(existing.as_ref()), existing) {
        (SessionState::NoSession, _) => {
            let id = sessions::insert_session(conn, manager_id, date, Some(at), None, 0.0, false)?;
            let ev = GeofenceEvent::new(EventKind::Enter, at, coordinate, within_fence);
            sessions::append_event(conn, id, &ev)?;
        }
        (SessionState::Closed, Some(session)) => {
            // Re-open the same record: new clock-in, clock-out cleared.
            // Hours are recomputed at the next close.
            sessions::update_session_stamps(conn, session.id, Some(at), None, session.total_hours)?;
            let ev = GeofenceEvent::new(EventKind::Enter, at, coordinate, within_fence);
            sessions::append_event(conn, session.id, &ev)?;
        }
        (SessionState::Open, Some(session)) => {
            // Idempotent: already clocked in, nothing changes.
            return Ok(ClockOutcome {
                session,
                geofence_warning,
                synthesized: false,
            });
        }
        (_, None) => {
            return Err(AppError::Other(
                "session state reported without a backing row".to_string(),
            ));
        }
    }

    if geofence_warning {
        audit_geofence_flag(conn, manager_id, date, EventKind::Enter, coordinate)?;
    }

    Ok(ClockOutcome {
        session: reload(conn, manager_id, date)?,
        geofence_warning,
        synthesized: false,
    })
}

/// Clock-out for the manager's open session.
///
/// With no open session anywhere and no record for the day, a same-instant
/// session is synthesized and flagged for review instead of rejecting the
/// call; a clock-out on an already-closed day is idempotent.
pub fn clock_out(
    conn: &Connection,
    manager_id: &str,
    date: NaiveDate,
    at: DateTime<Utc>,
    coordinate: Option<Coordinate>,
    within_fence: Option<bool>,
) -> AppResult<ClockOutcome> {
    let geofence_warning = within_fence == Some(false);

    if let Some(open) = sessions::load_open_session(conn, manager_id)? {
        let clock_in = open
            .clock_in
            .ok_or_else(|| AppError::Other("open session without clock-in".to_string()))?;
        // clock_out >= clock_in must hold; an out-of-order stamp closes at
        // the clock-in instant with zero additional hours.
        let effective_out = at.max(clock_in);
        let total = hours_between(clock_in, effective_out);

        sessions::update_session_stamps(conn, open.id, Some(clock_in), Some(effective_out), total)?;
        let ev = GeofenceEvent::new(EventKind::Exit, at, coordinate, within_fence);
        sessions::append_event(conn, open.id, &ev)?;

        if geofence_warning {
            audit_geofence_flag(conn, manager_id, open.date, EventKind::Exit, coordinate)?;
        }

        return Ok(ClockOutcome {
            session: reload(conn, manager_id, open.date)?,
            geofence_warning,
            synthesized: false,
        });
    }

    if let Some(closed) = sessions::load_session(conn, manager_id, date)? {
        // Second clock-out in a row: leave clock_out and total_hours as
        // the first one set them.
        let synthesized = closed.synthesized;
        return Ok(ClockOutcome {
            session: closed,
            geofence_warning,
            synthesized,
        });
    }

    // No record exists yet: an out-of-order clock-out is never silently
    // dropped. Synthesize a same-instant session and flag it for review.
    let id = sessions::insert_session(conn, manager_id, date, Some(at), Some(at), 0.0, true)?;
    let ev = GeofenceEvent::new(EventKind::Exit, at, coordinate, within_fence);
    sessions::append_event(conn, id, &ev)?;

    audit(
        conn,
        "synthesized_clockout",
        manager_id,
        "clock-out with no open session, synthesized same-instant record",
        Some(&json!({ "date": date.format("%Y-%m-%d").to_string() })),
    )?;

    if geofence_warning {
        audit_geofence_flag(conn, manager_id, date, EventKind::Exit, coordinate)?;
    }

    Ok(ClockOutcome {
        session: reload(conn, manager_id, date)?,
        geofence_warning,
        synthesized: true,
    })
}
