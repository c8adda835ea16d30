use crate::cli::commands::build_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::task::TaskStatus;
use crate::ui::messages::success;
use std::collections::BTreeSet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let engine = build_engine(cfg)?;

    match cmd {
        Commands::Tasks { project } => {
            let tasks = engine.tasks(project.as_deref())?;

            if tasks.is_empty() {
                println!("No tasks.");
                return Ok(());
            }

            for t in &tasks {
                println!(
                    "{} [{}] {} ({}) -> {}",
                    t.id,
                    t.status.to_db_str(),
                    t.title,
                    t.project_id,
                    t.assigned_to.as_deref().unwrap_or("-")
                );
            }

            // One load line per assignee seen in the listing.
            let assignees: BTreeSet<&str> =
                tasks.iter().filter_map(|t| t.assigned_to.as_deref()).collect();
            for manager in assignees {
                println!("load {}: {}", manager, engine.task_load(manager)?);
            }
        }
        Commands::Complete { id } => {
            let task = engine.complete_task(id, TaskStatus::Completed)?;
            success(format!("Task {} completed", task.id));
        }
        Commands::Reject { id } => {
            let task = engine.complete_task(id, TaskStatus::Rejected)?;
            success(format!("Task {} rejected", task.id));
        }
        Commands::Release { manager } => {
            engine.release_task_load(manager)?;
            success(format!("Released one open-task slot for {manager}"));
        }
        _ => {}
    }

    Ok(())
}
