use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::Ledger;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ledger = Ledger::open(&cfg.database)?;
    ledger.with_conn(init_db)?;

    if !cli.test {
        cfg.save()?;
    }

    success(format!("Ledger initialized at {}", cfg.database));
    Ok(())
}
