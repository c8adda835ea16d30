use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Availability snapshot for one field manager, owned by the leave/admin
/// workflow. Read-only to this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerAvailability {
    pub manager_id: String,
    #[serde(default)]
    pub assigned_project_ids: BTreeSet<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_on_leave: bool,
}

impl ManagerAvailability {
    /// Eligibility for task assignment on a project: active, not on leave,
    /// and assigned to the project.
    pub fn is_eligible_for(&self, project_id: &str) -> bool {
        self.is_active && !self.is_on_leave && self.assigned_project_ids.contains(project_id)
    }
}
