pub mod assign;
pub mod clock;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod status;
pub mod summary;
pub mod tasks;

use std::sync::Arc;

use crate::config::Config;
use crate::core::notify::NullSink;
use crate::db::pool::Ledger;
use crate::engine::Engine;
use crate::errors::AppResult;
use crate::registry::SiteFile;
use crate::utils::time::normalize_date;
use chrono::{Datelike, Utc};

/// Build an engine from the active configuration: ledger file plus the
/// site file's registry/directory (empty registry when none is given).
pub(crate) fn build_engine(cfg: &Config) -> AppResult<Engine> {
    let ledger = Ledger::open(&cfg.database)?;

    let site = match &cfg.site_file {
        Some(path) => SiteFile::load(path)?,
        None => SiteFile::empty(),
    };
    let site = Arc::new(site);

    Engine::new(
        ledger,
        site.clone(),
        site,
        Arc::new(NullSink),
        cfg.utc_offset_minutes,
    )
}

/// Current (year, month) in the deployment zone.
pub(crate) fn current_month(cfg: &Config) -> AppResult<(i32, u32)> {
    let today = normalize_date(Utc::now(), cfg.utc_offset_minutes)?;
    Ok((today.year(), today.month()))
}
