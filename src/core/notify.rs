//! Outbound notifications, fire-and-forget.
//!
//! Notifications are emitted after the ledger transaction commits; the
//! engine never awaits delivery and a sink failure never rolls back the
//! mutation that triggered it.

use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Serialize)]
pub enum Notification {
    TaskAssigned {
        task_id: String,
        manager_id: String,
        project_id: String,
    },
    GeofenceFlagged {
        manager_id: String,
        date: String,
        kind: String,
    },
    SessionSynthesized {
        manager_id: String,
        date: String,
    },
}

pub trait NotificationSink: Send + Sync {
    fn deliver(&self, note: &Notification) -> Result<(), String>;
}

/// Discards everything. Default sink when no dispatcher is wired up.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn deliver(&self, _note: &Notification) -> Result<(), String> {
        Ok(())
    }
}

/// Collects notifications in memory; used by tests and the CLI's verbose
/// output.
#[derive(Default)]
pub struct BufferSink {
    notes: Mutex<Vec<Notification>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        match self.notes.lock() {
            Ok(mut notes) => notes.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl NotificationSink for BufferSink {
    fn deliver(&self, note: &Notification) -> Result<(), String> {
        self.notes
            .lock()
            .map_err(|_| "buffer sink poisoned".to_string())?
            .push(note.clone());
        Ok(())
    }
}
