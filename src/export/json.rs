use crate::errors::{AppError, AppResult};
use crate::models::session::AttendanceSession;
use crate::models::summary::MonthlySummary;

/// Write sessions as pretty-printed JSON.
pub fn write_sessions_json(path: &str, sessions: &[AttendanceSession]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(sessions).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write monthly summaries as pretty-printed JSON.
pub fn write_summaries_json(path: &str, summaries: &[MonthlySummary]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(summaries).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
