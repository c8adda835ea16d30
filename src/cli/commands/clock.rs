use crate::cli::commands::build_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracker::ClockOutcome;
use crate::errors::{AppError, AppResult};
use crate::models::coordinate::Coordinate;
use crate::ui::messages::{success, warning};
use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};

fn parse_inputs(
    cfg: &Config,
    at: &Option<String>,
    coord: &Option<String>,
) -> AppResult<(DateTime<Utc>, Option<Coordinate>)> {
    let at = match at {
        Some(s) => parse_timestamp(s, cfg.utc_offset_minutes)?,
        None => Utc::now(),
    };

    let coordinate = match coord {
        Some(s) => Some(
            Coordinate::from_pair(s).ok_or_else(|| AppError::InvalidCoordinate(s.clone()))?,
        ),
        None => None,
    };

    Ok((at, coordinate))
}

fn report(manager: &str, verb: &str, outcome: &ClockOutcome) {
    success(format!(
        "{verb} recorded for {manager} on {} ({:.2} h)",
        outcome.session.date_str(),
        outcome.session.total_hours
    ));

    if outcome.geofence_warning {
        warning("Position is outside the project work area; recorded for review");
    }
    if outcome.synthesized {
        warning("No open session found; a same-instant session was synthesized and flagged");
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let engine = build_engine(cfg)?;

    match cmd {
        Commands::ClockIn { manager, at, coord } => {
            let (at, coordinate) = parse_inputs(cfg, at, coord)?;
            let outcome = engine.clock_in(manager, at, coordinate)?;
            report(manager, "Clock-in", &outcome);
        }
        Commands::ClockOut { manager, at, coord } => {
            let (at, coordinate) = parse_inputs(cfg, at, coord)?;
            let outcome = engine.clock_out(manager, at, coordinate)?;
            report(manager, "Clock-out", &outcome);
        }
        _ => {}
    }

    Ok(())
}
