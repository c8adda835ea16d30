//! Unified application error type.
//! All modules (db, core, engine, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Ledger / database
    // ---------------------------
    #[error("Ledger error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Ledger lock poisoned")]
    LedgerPoisoned,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid month format: {0}")]
    InvalidMonth(String),

    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid task status: {0}")]
    InvalidTaskStatus(String),

    #[error("Invalid task priority: {0}")]
    InvalidTaskPriority(String),

    // ---------------------------
    // Assignment errors
    // ---------------------------
    #[error("No eligible manager for project {project_id}: {reason}")]
    NoEligibleManager { project_id: String, reason: String },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    // ---------------------------
    // Config / site file errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Site file error: {0}")]
    SiteFile(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
