use super::geofence_event::GeofenceEvent;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Explicit clock state for one (manager, date) record.
///
/// Kept as a tagged value rather than inferred from which optional fields
/// happen to be set, so every transition site matches on the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Open,
    Closed,
}

/// The attendance record for one manager on one calendar day.
///
/// Identity key is (manager_id, date); the row is created on first
/// clock-in and never deleted. A same-day leave-and-return re-opens this
/// record instead of creating a second one.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSession {
    pub id: i64,
    pub manager_id: String,
    pub date: NaiveDate,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub events: Vec<GeofenceEvent>,
    pub total_hours: f64,
    /// Set when the record was synthesized by a clock-out that found no
    /// open session (forgotten clock-in or out-of-order delivery) so it
    /// can be audited apart from normal sessions.
    pub synthesized: bool,
    pub created_at: String,
}

impl AttendanceSession {
    pub fn state(&self) -> SessionState {
        match (self.clock_in, self.clock_out) {
            (Some(_), None) => SessionState::Open,
            _ => SessionState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// State of the (manager, date) slot, covering the not-yet-created case.
pub fn state_of(session: Option<&AttendanceSession>) -> SessionState {
    match session {
        None => SessionState::NoSession,
        Some(s) => s.state(),
    }
}
