//! Time utilities: timestamp parsing, calendar-day normalization, and the
//! worked-hours computation shared by tracker and aggregator.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse an RFC 3339 timestamp, or a naive "YYYY-MM-DD HH:MM" treated as
/// being in the deployment zone given by `utc_offset_minutes`.
pub fn parse_timestamp(s: &str, utc_offset_minutes: i32) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))?;

    let offset = deployment_offset(utc_offset_minutes)?;
    match offset.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        _ => Err(AppError::InvalidTimestamp(s.to_string())),
    }
}

/// Resolve the calendar day a timestamp falls on in the deployment zone.
/// All session identity keys use this normalization.
pub fn normalize_date(at: DateTime<Utc>, utc_offset_minutes: i32) -> AppResult<NaiveDate> {
    let offset = deployment_offset(utc_offset_minutes)?;
    Ok(at.with_timezone(&offset).date_naive())
}

fn deployment_offset(utc_offset_minutes: i32) -> AppResult<FixedOffset> {
    FixedOffset::east_opt(utc_offset_minutes * 60).ok_or_else(|| {
        AppError::Config(format!("invalid utc_offset_minutes: {utc_offset_minutes}"))
    })
}

/// Worked hours between two stamps, rounded to two decimal places.
/// Negative spans clamp to zero.
pub fn hours_between(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> f64 {
    let seconds = (clock_out - clock_in).num_seconds();
    if seconds <= 0 {
        return 0.0;
    }
    round2(seconds as f64 / 3600.0)
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
