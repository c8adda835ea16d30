use crate::cli::commands::build_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use crate::utils::time::normalize_date;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { manager, date } = cmd {
        let date = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => normalize_date(Utc::now(), cfg.utc_offset_minutes)?,
        };

        let engine = build_engine(cfg)?;
        let status = engine.daily_status(manager, date)?;

        println!("{} {}: {}", manager, date.format("%Y-%m-%d"), status.as_str());
    }
    Ok(())
}
