use crate::errors::{AppError, AppResult};
use crate::models::session::AttendanceSession;
use crate::models::summary::MonthlySummary;
use csv::Writer;

/// Write session rows to CSV.
pub fn write_sessions_csv(path: &str, sessions: &[AttendanceSession]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record([
        "manager_id",
        "date",
        "clock_in",
        "clock_out",
        "total_hours",
        "synthesized",
        "events",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for s in sessions {
        wtr.write_record(&[
            s.manager_id.clone(),
            s.date_str(),
            s.clock_in.map(|t| t.to_rfc3339()).unwrap_or_default(),
            s.clock_out.map(|t| t.to_rfc3339()).unwrap_or_default(),
            format!("{:.2}", s.total_hours),
            if s.synthesized { "1" } else { "0" }.to_string(),
            s.events.len().to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write monthly summaries to CSV.
pub fn write_summaries_csv(path: &str, summaries: &[MonthlySummary]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record([
        "manager_id",
        "month",
        "present_days",
        "partial_days",
        "absent_days",
        "total_hours",
        "average_hours_per_present_day",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for s in summaries {
        wtr.write_record(&[
            s.manager_id.clone(),
            s.month_str(),
            s.present_days.to_string(),
            s.partial_days.to_string(),
            s.absent_days.to_string(),
            format!("{:.2}", s.total_hours),
            format!("{:.2}", s.average_hours_per_present_day),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
