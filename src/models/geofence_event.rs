use super::coordinate::Coordinate;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventKind {
    Enter,
    Exit,
}

impl EventKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Enter => "enter",
            EventKind::Exit => "exit",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "enter" => Some(EventKind::Enter),
            "exit" => Some(EventKind::Exit),
            _ => None,
        }
    }
}

/// One clock event inside a session's log.
///
/// Immutable once appended; insertion order follows the event timestamps.
/// `within_fence` records the geofence verdict at the time of the event
/// (None when no coordinate was supplied or no fence is on record) — it is
/// advisory metadata, never a gate.
#[derive(Debug, Clone, Serialize)]
pub struct GeofenceEvent {
    pub kind: EventKind,
    pub at: DateTime<Utc>,
    pub coordinate: Option<Coordinate>,
    pub within_fence: Option<bool>,
}

impl GeofenceEvent {
    pub fn new(
        kind: EventKind,
        at: DateTime<Utc>,
        coordinate: Option<Coordinate>,
        within_fence: Option<bool>,
    ) -> Self {
        Self {
            kind,
            at,
            coordinate,
            within_fence,
        }
    }

    /// True when a coordinate was supplied and fell outside the fence.
    pub fn flagged(&self) -> bool {
        self.within_fence == Some(false)
    }
}
