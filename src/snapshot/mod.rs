//! Serializable project snapshots and the file formats built on them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::activity::{Activity, Milestone};
use crate::calculations::{CriticalPathResult, calculate_critical_path};
use crate::dependency::{Dependency, MAX_LAG_DAYS};
use crate::errors::{CpmError, PersistenceError, PersistenceResult};
use crate::metadata::ScheduleMetadata;

pub mod file;

pub use file::{export_result_to_csv, load_project_from_json, save_project_to_json};

/// Everything needed to schedule one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub metadata: ScheduleMetadata,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl ProjectSnapshot {
    pub fn calculate(&self) -> Result<CriticalPathResult, CpmError> {
        calculate_critical_path(&self.activities, &self.milestones, &self.dependencies)
    }

    /// Rejects snapshots that reuse a node id, hold empty ids or carry a lag
    /// beyond [`MAX_LAG_DAYS`].
    pub fn validate(&self) -> PersistenceResult<()> {
        let mut seen = HashSet::with_capacity(self.activities.len() + self.milestones.len());
        let ids = self
            .activities
            .iter()
            .map(|a| a.id.as_str())
            .chain(self.milestones.iter().map(|m| m.id.as_str()));
        for id in ids {
            if id.trim().is_empty() {
                return Err(PersistenceError::InvalidData(
                    "node id must not be empty".to_string(),
                ));
            }
            if !seen.insert(id) {
                return Err(PersistenceError::InvalidData(format!(
                    "duplicate node id {id}"
                )));
            }
        }
        if let Some(dep) = self
            .dependencies
            .iter()
            .find(|d| d.lag_days.unsigned_abs() > MAX_LAG_DAYS.unsigned_abs())
        {
            return Err(PersistenceError::InvalidData(format!(
                "lag of {} days on {} -> {} is out of range (at most {MAX_LAG_DAYS})",
                dep.lag_days, dep.source_id, dep.target_id
            )));
        }
        Ok(())
    }
}
