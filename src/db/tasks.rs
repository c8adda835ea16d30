use crate::errors::{AppError, AppResult};
use crate::models::task::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_task_row(row: &Row) -> Result<Task> {
    let priority_str: String = row.get("priority")?;
    let priority = TaskPriority::from_db_str(&priority_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTaskPriority(priority_str.clone())),
        )
    })?;

    let status_str: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTaskStatus(status_str.clone())),
        )
    })?;

    let created_str: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(created_str.clone())),
            )
        })?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        project_id: row.get("project_id")?,
        priority,
        status,
        assigned_to: row.get("assigned_to")?,
        created_at,
    })
}

pub fn load_task(conn: &Connection, id: &str) -> AppResult<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_task_row).optional()?)
}

pub fn load_tasks(conn: &Connection, project_id: Option<&str>) -> AppResult<Vec<Task>> {
    let mut out = Vec::new();

    match project_id {
        Some(project) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM tasks WHERE project_id = ?1 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map([project], map_task_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM tasks ORDER BY created_at ASC, id ASC")?;
            let rows = stmt.query_map([], map_task_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn insert_task(conn: &Connection, task: &Task) -> AppResult<()> {
    conn.execute(
        "INSERT INTO tasks (id, title, project_id, priority, status, assigned_to, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            task.id,
            task.title,
            task.project_id,
            task.priority.to_db_str(),
            task.status.to_db_str(),
            task.assigned_to,
            task.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_task_status(conn: &Connection, id: &str, status: TaskStatus) -> AppResult<()> {
    conn.execute(
        "UPDATE tasks SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )?;
    Ok(())
}

/// Live open-task count for one manager. Missing row reads as zero.
pub fn load_counter(conn: &Connection, manager_id: &str) -> AppResult<i64> {
    let load: Option<i64> = conn
        .query_row(
            "SELECT load FROM task_load WHERE manager_id = ?1",
            [manager_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(load.unwrap_or(0))
}

/// Counters for a candidate pool, read inside the assignment transaction
/// so the pick and the increment see the same state.
pub fn load_counters(conn: &Connection, manager_ids: &[String]) -> AppResult<Vec<(String, i64)>> {
    let mut out = Vec::with_capacity(manager_ids.len());
    for id in manager_ids {
        out.push((id.clone(), load_counter(conn, id)?));
    }
    Ok(out)
}

pub fn increment_counter(conn: &Connection, manager_id: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO task_load (manager_id, load) VALUES (?1, 1)
         ON CONFLICT(manager_id) DO UPDATE SET load = load + 1",
        [manager_id],
    )?;
    Ok(())
}

/// Decrement with a zero floor; returns whether a decrement happened.
pub fn decrement_counter(conn: &Connection, manager_id: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE task_load SET load = load - 1 WHERE manager_id = ?1 AND load > 0",
        [manager_id],
    )?;
    Ok(changed > 0)
}
