use crate::cli::commands::{build_engine, current_month};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, csv, json};
use crate::ui::messages::success;
use crate::utils::date::parse_month;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        out,
        manager,
        month,
        sessions,
        summaries,
    } = cmd
    {
        let (year, month_num) = match month {
            Some(m) => parse_month(m)?,
            None => current_month(cfg)?,
        };

        let engine = build_engine(cfg)?;

        if *sessions {
            let manager = manager
                .as_deref()
                .ok_or_else(|| AppError::Export("--sessions requires --manager".to_string()))?;

            let rows = engine.monthly_sessions(manager, year, month_num)?;
            match format {
                ExportFormat::Csv => csv::write_sessions_csv(out, &rows)?,
                ExportFormat::Json => json::write_sessions_json(out, &rows)?,
            }
            success(format!("Exported {} session(s) to {}", rows.len(), out));
        } else if *summaries {
            let rows: Vec<_> = engine
                .all_managers_summary(year, month_num)?
                .into_values()
                .collect();
            match format {
                ExportFormat::Csv => csv::write_summaries_csv(out, &rows)?,
                ExportFormat::Json => json::write_summaries_json(out, &rows)?,
            }
            success(format!("Exported {} summaries to {}", rows.len(), out));
        } else {
            return Err(AppError::Export(
                "nothing to export: pass --sessions or --summaries".to_string(),
            ));
        }
    }
    Ok(())
}
