use crate::cli::commands::{build_engine, current_month};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::summary::MonthlySummary;
use crate::utils::date::parse_month;

fn print_summary(s: &MonthlySummary) {
    println!(
        "{} {}: present {} | partial {} | absent {} | {:.2} h total | {:.2} h/present day",
        s.manager_id,
        s.month_str(),
        s.present_days,
        s.partial_days,
        s.absent_days,
        s.total_hours,
        s.average_hours_per_present_day
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary {
        manager,
        month,
        all,
    } = cmd
    {
        let (year, month_num) = match month {
            Some(m) => parse_month(m)?,
            None => current_month(cfg)?,
        };

        let engine = build_engine(cfg)?;

        if *all {
            for (_, summary) in engine.all_managers_summary(year, month_num)? {
                print_summary(&summary);
            }
        } else {
            let manager = manager
                .as_deref()
                .ok_or_else(|| AppError::Other("a manager id or --all is required".to_string()))?;
            print_summary(&engine.monthly_summary(manager, year, month_num)?);
        }
    }
    Ok(())
}
