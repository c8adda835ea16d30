//! The engine facade exposed to the surrounding portal.
//!
//! Thin orchestration over the core components: every mutation is one
//! ledger transaction, advisory conditions ride on the success value, and
//! notifications go out only after the transaction commits. Nothing here
//! caches authoritative state between calls.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::balancer;
use crate::core::geofence;
use crate::core::notify::{Notification, NotificationSink};
use crate::core::tracker::{self, ClockOutcome};
use crate::core::aggregator;
use crate::db::audit::{self, AuditRow};
use crate::db::pool::Ledger;
use crate::db::{initialize, sessions, tasks};
use crate::errors::{AppError, AppResult};
use crate::models::coordinate::Coordinate;
use crate::models::geofence::Geofence;
use crate::models::session::AttendanceSession;
use crate::models::summary::{DayStatus, MonthlySummary};
use crate::models::task::{Task, TaskStatus};
use crate::registry::{GeofenceRegistry, ManagerDirectory};
use crate::utils::date::month_bounds;
use crate::utils::time::normalize_date;
use serde_json::json;

pub struct Engine {
    ledger: Ledger,
    registry: Arc<dyn GeofenceRegistry>,
    directory: Arc<dyn ManagerDirectory>,
    sink: Arc<dyn NotificationSink>,
    utc_offset_minutes: i32,
}

impl Engine {
    pub fn new(
        ledger: Ledger,
        registry: Arc<dyn GeofenceRegistry>,
        directory: Arc<dyn ManagerDirectory>,
        sink: Arc<dyn NotificationSink>,
        utc_offset_minutes: i32,
    ) -> AppResult<Self> {
        ledger.with_conn(initialize::init_db)?;
        Ok(Self {
            ledger,
            registry,
            directory,
            sink,
            utc_offset_minutes,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn today(&self) -> AppResult<NaiveDate> {
        normalize_date(Utc::now(), self.utc_offset_minutes)
    }

    /// Fences of every project the manager is assigned to. The exposed
    /// clock calls carry no project id, so the verdict is "inside any of
    /// the manager's sites".
    fn fences_for_manager(&self, manager_id: &str) -> Vec<Geofence> {
        let Some(availability) = self.directory.availability(manager_id) else {
            return Vec::new();
        };

        availability
            .assigned_project_ids
            .iter()
            .filter_map(|p| self.registry.fence_for(p))
            .collect()
    }

    pub fn clock_in(
        &self,
        manager_id: &str,
        at: DateTime<Utc>,
        coordinate: Option<Coordinate>,
    ) -> AppResult<ClockOutcome> {
        let date = normalize_date(at, self.utc_offset_minutes)?;
        let fences = self.fences_for_manager(manager_id);
        let within = geofence::verdict(coordinate, &fences);

        let outcome = self
            .ledger
            .with_tx(|tx| tracker::clock_in(tx, manager_id, date, at, coordinate, within))?;

        if outcome.geofence_warning {
            let _ = self.sink.deliver(&Notification::GeofenceFlagged {
                manager_id: manager_id.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                kind: "enter".to_string(),
            });
        }

        Ok(outcome)
    }

    pub fn clock_out(
        &self,
        manager_id: &str,
        at: DateTime<Utc>,
        coordinate: Option<Coordinate>,
    ) -> AppResult<ClockOutcome> {
        let date = normalize_date(at, self.utc_offset_minutes)?;
        let fences = self.fences_for_manager(manager_id);
        let within = geofence::verdict(coordinate, &fences);

        let outcome = self
            .ledger
            .with_tx(|tx| tracker::clock_out(tx, manager_id, date, at, coordinate, within))?;

        if outcome.geofence_warning {
            let _ = self.sink.deliver(&Notification::GeofenceFlagged {
                manager_id: manager_id.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                kind: "exit".to_string(),
            });
        }
        if outcome.synthesized {
            let _ = self.sink.deliver(&Notification::SessionSynthesized {
                manager_id: manager_id.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
            });
        }

        Ok(outcome)
    }

    pub fn daily_status(&self, manager_id: &str, date: NaiveDate) -> AppResult<DayStatus> {
        let today = self.today()?;
        let session = self
            .ledger
            .with_conn(|conn| sessions::load_session(conn, manager_id, date))?;
        Ok(aggregator::classify_day(session.as_ref(), date, today))
    }

    pub fn monthly_summary(
        &self,
        manager_id: &str,
        year: i32,
        month: u32,
    ) -> AppResult<MonthlySummary> {
        let (first, last) = month_bounds(year, month)?;
        let today = self.today()?;
        let sessions = self
            .ledger
            .with_conn(|conn| sessions::load_sessions_in_range(conn, manager_id, first, last))?;
        Ok(aggregator::summarize(
            manager_id, &sessions, year, month, today,
        ))
    }

    /// Session records of one manager's month, event logs included.
    pub fn monthly_sessions(
        &self,
        manager_id: &str,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<AttendanceSession>> {
        let (first, last) = month_bounds(year, month)?;
        self.ledger
            .with_conn(|conn| sessions::load_sessions_in_range(conn, manager_id, first, last))
    }

    /// Admin view: one summary per manager known to the directory. Role
    /// checks belong to the caller.
    pub fn all_managers_summary(
        &self,
        year: i32,
        month: u32,
    ) -> AppResult<BTreeMap<String, MonthlySummary>> {
        let mut out = BTreeMap::new();
        for manager in self.directory.all_managers() {
            let summary = self.monthly_summary(&manager.manager_id, year, month)?;
            out.insert(manager.manager_id, summary);
        }
        Ok(out)
    }

    /// Assign a newly created task to the least-loaded eligible manager.
    ///
    /// The whole read-pick-write runs in one transaction; an empty eligible
    /// pool rejects the request and leaves no task row behind. Retries are
    /// safe: a task id that already exists returns its original assignee.
    pub fn assign_task(&self, task: Task) -> AppResult<String> {
        let project_id = task.project_id.clone();
        let candidates = self.directory.candidates_for(&project_id);

        let chosen = self.ledger.with_tx(|tx| {
            if let Some(existing) = tasks::load_task(tx, &task.id)? {
                return existing.assigned_to.ok_or_else(|| {
                    AppError::Other(format!("task {} exists without an assignee", task.id))
                });
            }

            let pool = balancer::eligible(&candidates, &project_id);
            if pool.is_empty() {
                return Err(balancer::no_eligible_manager(&project_id));
            }

            let ids: Vec<String> = pool.iter().map(|m| m.manager_id.clone()).collect();
            let counters = tasks::load_counters(tx, &ids)?;
            let chosen = balancer::pick_least_loaded(&counters)
                .ok_or_else(|| balancer::no_eligible_manager(&project_id))?;

            let mut stored = task.clone();
            stored.status = TaskStatus::Pending;
            stored.assigned_to = Some(chosen.clone());
            tasks::insert_task(tx, &stored)?;
            tasks::increment_counter(tx, &chosen)?;

            audit::audit(
                tx,
                "task_assigned",
                &chosen,
                &format!("task {} assigned", stored.id),
                Some(&json!({ "task_id": stored.id, "project_id": project_id })),
            )?;

            Ok(chosen)
        })?;

        let _ = self.sink.deliver(&Notification::TaskAssigned {
            task_id: task.id,
            manager_id: chosen.clone(),
            project_id,
        });

        Ok(chosen)
    }

    /// Decrement a manager's open-task counter (task completed or
    /// rejected upstream). Floored at zero.
    pub fn release_task_load(&self, manager_id: &str) -> AppResult<()> {
        self.ledger.with_tx(|tx| {
            let released = tasks::decrement_counter(tx, manager_id)?;
            if released {
                audit::audit(
                    tx,
                    "load_released",
                    manager_id,
                    "open-task counter decremented",
                    None,
                )?;
            }
            Ok(())
        })
    }

    /// Close out a task (completed or rejected), releasing the assignee's
    /// load in the same transaction. Closing an already-closed task is a
    /// no-op.
    pub fn complete_task(&self, task_id: &str, status: TaskStatus) -> AppResult<Task> {
        if status.is_open() {
            return Err(AppError::InvalidTaskStatus(format!(
                "cannot close a task with open status {}",
                status.to_db_str()
            )));
        }

        self.ledger.with_tx(|tx| {
            let task = tasks::load_task(tx, task_id)?
                .ok_or_else(|| AppError::UnknownTask(task_id.to_string()))?;

            if !task.status.is_open() {
                return Ok(task);
            }

            tasks::update_task_status(tx, task_id, status)?;
            if let Some(assignee) = &task.assigned_to {
                tasks::decrement_counter(tx, assignee)?;
            }

            audit::audit(
                tx,
                match status {
                    TaskStatus::Rejected => "task_rejected",
                    _ => "task_completed",
                },
                task.assigned_to.as_deref().unwrap_or(""),
                &format!("task {task_id} closed as {}", status.to_db_str()),
                None,
            )?;

            tasks::load_task(tx, task_id)?
                .ok_or_else(|| AppError::UnknownTask(task_id.to_string()))
        })
    }

    pub fn tasks(&self, project_id: Option<&str>) -> AppResult<Vec<Task>> {
        self.ledger
            .with_conn(|conn| tasks::load_tasks(conn, project_id))
    }

    pub fn task_load(&self, manager_id: &str) -> AppResult<i64> {
        self.ledger
            .with_conn(|conn| tasks::load_counter(conn, manager_id))
    }

    pub fn audit_log(&self) -> AppResult<Vec<AuditRow>> {
        self.ledger.with_conn(audit::load_audit)
    }
}
