use crate::cli::commands::build_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::task::{Task, TaskPriority};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assign {
        id,
        title,
        project,
        priority,
    } = cmd
    {
        let priority = TaskPriority::from_db_str(priority)
            .ok_or_else(|| AppError::InvalidTaskPriority(priority.clone()))?;

        let engine = build_engine(cfg)?;
        let task = Task::new(id, title, project, priority);
        let manager = engine.assign_task(task)?;

        success(format!("Task {id} assigned to {manager}"));
    }
    Ok(())
}
