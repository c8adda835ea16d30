//! Pure attendance aggregation over a read-only session range.
//!
//! Deterministic by construction: identical inputs always yield identical
//! output, and nothing here touches the ledger.

use crate::models::session::AttendanceSession;
use crate::models::summary::{DayStatus, MonthlySummary};
use crate::utils::date::all_days_of_month;
use crate::utils::time::round2;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Classify one calendar day from its (possible) session record.
pub fn classify_day(
    session: Option<&AttendanceSession>,
    day: NaiveDate,
    today: NaiveDate,
) -> DayStatus {
    if day > today {
        return DayStatus::Future;
    }

    match session {
        None => DayStatus::Absent,
        Some(s) => match (s.clock_in, s.clock_out) {
            (Some(_), Some(_)) => DayStatus::Present,
            (None, None) => DayStatus::Absent,
            _ => DayStatus::Partial,
        },
    }
}

/// Monthly summary for one manager, from the sessions of that month.
/// Days after `today` are excluded from every count.
pub fn summarize(
    manager_id: &str,
    sessions: &[AttendanceSession],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> MonthlySummary {
    let by_date: BTreeMap<NaiveDate, &AttendanceSession> =
        sessions.iter().map(|s| (s.date, s)).collect();

    let mut present_days = 0u32;
    let mut partial_days = 0u32;
    let mut absent_days = 0u32;
    let mut total_hours = 0.0f64;

    for day in all_days_of_month(year, month) {
        let session = by_date.get(&day).copied();
        match classify_day(session, day, today) {
            DayStatus::Future => {}
            DayStatus::Absent => absent_days += 1,
            DayStatus::Present => {
                present_days += 1;
                total_hours += session.map(|s| s.total_hours).unwrap_or(0.0);
            }
            DayStatus::Partial => {
                partial_days += 1;
                total_hours += session.map(|s| s.total_hours).unwrap_or(0.0);
            }
        }
    }

    let total_hours = round2(total_hours);
    let average = if present_days > 0 {
        round2(total_hours / f64::from(present_days))
    } else {
        0.0
    };

    MonthlySummary {
        manager_id: manager_id.to_string(),
        year,
        month,
        present_days,
        partial_days,
        absent_days,
        total_hours,
        average_hours_per_present_day: average,
    }
}
