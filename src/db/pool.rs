//! The allocation ledger handle: a mutex-guarded SQLite connection.
//!
//! Every mutation in the engine goes through [`Ledger::with_tx`], which
//! serializes concurrent writers on the mutex and runs the closure inside a
//! `BEGIN IMMEDIATE` transaction. Session and counter invariants are backed
//! by schema constraints, so a retried call can never duplicate a session
//! or double-increment a counter.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Ledger {
    conn: Arc<Mutex<Connection>>,
}

impl Ledger {
    /// Open (or create) the ledger file, applying the WAL pragmas used for
    /// concurrent request handlers.
    pub fn open(path: &str) -> AppResult<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "busy_timeout", 5000)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a read-only closure against the guarded connection.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| AppError::LedgerPoisoned)?;
        func(&conn)
    }

    /// Run a mutating closure inside a single immediate transaction.
    /// The closure either commits as a whole or leaves no trace.
    pub fn with_tx<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction) -> AppResult<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| AppError::LedgerPoisoned)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
