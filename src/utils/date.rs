use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a "YYYY-MM" month string.
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    // YYYY-MM, validated by parsing the first of the month
    let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidMonth(s.to_string()))?;
    Ok((first.year(), first.month()))
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(mut d) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return out;
    };

    while d.month() == month {
        out.push(d);
        d = match d.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    out
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let days = all_days_of_month(year, month);
    match (days.first(), days.last()) {
        (Some(first), Some(last)) => Ok((*first, *last)),
        _ => Err(AppError::InvalidMonth(format!("{year:04}-{month:02}"))),
    }
}
