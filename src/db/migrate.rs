use crate::db::audit::audit;
use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `audit_log` table exists with the modern schema.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL,
            detail    TEXT DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if a table has a given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `sessions` table with the modern schema.
///
/// Two schema-level backstops guard the core invariants even if a caller
/// bypasses the tracker: the (manager_id, date) unique key, and a partial
/// unique index that forbids two open sessions for one manager.
fn create_sessions_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            manager_id   TEXT NOT NULL,
            date         TEXT NOT NULL,
            clock_in     TEXT,
            clock_out    TEXT,
            total_hours  REAL NOT NULL DEFAULT 0,
            synthesized  INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL,
            UNIQUE (manager_id, date)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_single_open
            ON sessions(manager_id)
            WHERE clock_in IS NOT NULL AND clock_out IS NULL;

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);

        CREATE TABLE IF NOT EXISTS session_events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id   INTEGER NOT NULL REFERENCES sessions(id),
            kind         TEXT NOT NULL CHECK(kind IN ('enter','exit')),
            at           TEXT NOT NULL,
            lat          REAL,
            lon          REAL,
            within_fence INTEGER,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_session_events_session
            ON session_events(session_id);
        "#,
    )?;
    Ok(())
}

/// Create the `tasks` and `task_load` tables.
fn create_task_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            project_id  TEXT NOT NULL,
            priority    TEXT NOT NULL CHECK(priority IN ('low','normal','high','urgent')),
            status      TEXT NOT NULL CHECK(status IN ('pending','in_progress','completed','rejected')),
            assigned_to TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_assignee ON tasks(assigned_to, status);

        CREATE TABLE IF NOT EXISTS task_load (
            manager_id TEXT PRIMARY KEY,
            load       INTEGER NOT NULL DEFAULT 0 CHECK(load >= 0)
        );
        "#,
    )?;
    Ok(())
}

/// Migrate a pre-0.4 `sessions` table to include the `synthesized` column.
fn migrate_add_synthesized_to_sessions(conn: &Connection) -> AppResult<bool> {
    if !table_exists(conn, "sessions")? {
        return Ok(false);
    }

    if has_column(conn, "sessions", "synthesized")? {
        return Ok(false);
    }

    conn.execute_batch(
        "ALTER TABLE sessions ADD COLUMN synthesized INTEGER NOT NULL DEFAULT 0;",
    )?;
    Ok(true)
}

/// Run all pending schema migrations. Safe to call on every startup:
/// every step is a no-op once applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_audit_table(conn)?;
    create_sessions_tables(conn)?;
    create_task_tables(conn)?;

    if migrate_add_synthesized_to_sessions(conn)? {
        audit(
            conn,
            "migration_applied",
            "sessions",
            "added 'synthesized' column",
            None,
        )?;
    }

    Ok(())
}
