//! Collaborator seams: the project/geofence registry and the manager
//! directory, plus the YAML site file implementation used by the CLI and
//! tests. The engine only depends on the traits; a deployment wires in
//! whatever backs them.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::errors::{AppError, AppResult};
use crate::models::geofence::Geofence;
use crate::models::manager::ManagerAvailability;

pub trait GeofenceRegistry: Send + Sync {
    /// The project's boundary definition, if one is on record.
    fn fence_for(&self, project_id: &str) -> Option<Geofence>;
}

pub trait ManagerDirectory: Send + Sync {
    /// Candidate set for task assignment on a project (unfiltered; the
    /// balancer applies eligibility).
    fn candidates_for(&self, project_id: &str) -> Vec<ManagerAvailability>;

    fn availability(&self, manager_id: &str) -> Option<ManagerAvailability>;

    fn all_managers(&self) -> Vec<ManagerAvailability>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSite {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fence: Option<Geofence>,
}

/// Static registry + directory loaded from one YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteFile {
    #[serde(default)]
    pub projects: Vec<ProjectSite>,
    #[serde(default)]
    pub managers: Vec<ManagerAvailability>,
}

impl SiteFile {
    pub fn load(path: &str) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::SiteFile(format!("failed to parse {path}: {e}")))
    }

    /// No projects, no managers. Clock operations still work (no fences on
    /// record means no geofence verdicts); assignment rejects everything.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl GeofenceRegistry for SiteFile {
    fn fence_for(&self, project_id: &str) -> Option<Geofence> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .and_then(|p| p.fence.clone())
    }
}

impl ManagerDirectory for SiteFile {
    fn candidates_for(&self, project_id: &str) -> Vec<ManagerAvailability> {
        self.managers
            .iter()
            .filter(|m| m.assigned_project_ids.contains(project_id))
            .cloned()
            .collect()
    }

    fn availability(&self, manager_id: &str) -> Option<ManagerAvailability> {
        self.managers
            .iter()
            .find(|m| m.manager_id == manager_id)
            .cloned()
    }

    fn all_managers(&self) -> Vec<ManagerAvailability> {
        self.managers.clone()
    }
}
