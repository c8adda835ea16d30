use crate::cli::commands::build_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { .. } = cmd {
        let engine = build_engine(cfg)?;
        let rows = engine.audit_log()?;

        if rows.is_empty() {
            println!("Audit log is empty.");
            return Ok(());
        }

        println!("📜 Audit log:\n");
        for row in rows {
            let target = if row.target.is_empty() {
                row.operation.clone()
            } else {
                format!("{} ({})", row.operation, row.target)
            };
            println!("{:>4}: {} | {} => {}", row.id, row.date, target, row.message);
        }
    }
    Ok(())
}
