use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::activity::{Activity, Milestone};
use crate::calculations::{CriticalPathResult, calculate_critical_path};
use crate::dependency::Dependency;
use crate::errors::{CpmError, ScheduleError};
use crate::graph::would_create_cycle;
use crate::metadata::ScheduleMetadata;
use crate::snapshot::ProjectSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub node_count: usize,
    pub critical_count: usize,
    pub critical_path: Vec<String>,
    /// Day offset of the latest sink finish; negative when lags pull the
    /// whole schedule before day 0.
    pub project_duration: i64,
    pub project_finish: Option<NaiveDate>,
}

impl RefreshSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("nodes={}", self.node_count));
        parts.push(format!("critical={}", self.critical_count));
        parts.push(format!("duration={}d", self.project_duration));
        if let Some(date) = self.project_finish {
            parts.push(format!("finish={}", date));
        }
        if !self.critical_path.is_empty() {
            parts.push(format!("crit_path={}", self.critical_path.join("->")));
        }
        parts.join(", ")
    }
}

/// In-memory working copy of one project's schedule records.
///
/// Every structural edit drops the last computed result; call
/// [`Schedule::refresh`] to recompute it.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    metadata: ScheduleMetadata,
    activities: Vec<Activity>,
    milestones: Vec<Milestone>,
    dependencies: Vec<Dependency>,
    last_result: Option<CriticalPathResult>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_metadata(metadata: ScheduleMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub(crate) fn from_snapshot(snapshot: ProjectSnapshot) -> Self {
        Self {
            metadata: snapshot.metadata,
            activities: snapshot.activities,
            milestones: snapshot.milestones,
            dependencies: snapshot.dependencies,
            last_result: None,
        }
    }

    pub fn to_snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            metadata: self.metadata.clone(),
            activities: self.activities.clone(),
            milestones: self.milestones.clone(),
            dependencies: self.dependencies.clone(),
        }
    }

    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: ScheduleMetadata) {
        self.metadata = metadata;
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.metadata.project_name = name.into();
    }

    pub fn set_project_start_date(&mut self, date: Option<NaiveDate>) {
        self.metadata.project_start_date = date;
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn last_result(&self) -> Option<&CriticalPathResult> {
        self.last_result.as_ref()
    }

    pub fn node_count(&self) -> usize {
        self.activities.len() + self.milestones.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.activities.iter().any(|a| a.id == id) || self.milestones.iter().any(|m| m.id == id)
    }

    /// Inserts the activity or replaces the one with the same id.
    pub fn upsert_activity(&mut self, activity: Activity) -> Result<(), ScheduleError> {
        if self.milestones.iter().any(|m| m.id == activity.id) {
            return Err(ScheduleError::KindConflict(activity.id));
        }
        match self.activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => *existing = activity,
            None => self.activities.push(activity),
        }
        self.last_result = None;
        Ok(())
    }

    /// Inserts the milestone or replaces the one with the same id.
    pub fn upsert_milestone(&mut self, milestone: Milestone) -> Result<(), ScheduleError> {
        if self.activities.iter().any(|a| a.id == milestone.id) {
            return Err(ScheduleError::KindConflict(milestone.id));
        }
        match self.milestones.iter_mut().find(|m| m.id == milestone.id) {
            Some(existing) => *existing = milestone,
            None => self.milestones.push(milestone),
        }
        self.last_result = None;
        Ok(())
    }

    /// Removes a node and every dependency touching it.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let before = self.node_count();
        self.activities.retain(|a| a.id != id);
        self.milestones.retain(|m| m.id != id);
        if self.node_count() == before {
            return false;
        }
        self.dependencies
            .retain(|d| d.source_id != id && d.target_id != id);
        self.last_result = None;
        true
    }

    /// Whether `source -> target` would close a cycle with the dependencies
    /// currently on record.
    pub fn would_create_cycle(&self, source_id: &str, target_id: &str) -> bool {
        would_create_cycle(&self.dependencies, source_id, target_id)
    }

    /// Records a dependency after checking that both endpoints exist, that
    /// the pair is new and that it keeps the graph acyclic.
    pub fn add_dependency(&mut self, dependency: Dependency) -> Result<(), ScheduleError> {
        for id in [&dependency.source_id, &dependency.target_id] {
            if !self.contains_node(id) {
                return Err(ScheduleError::UnknownNode(id.clone()));
            }
        }
        if self
            .dependencies
            .iter()
            .any(|d| d.connects(&dependency.source_id, &dependency.target_id))
        {
            return Err(ScheduleError::DuplicateDependency {
                source_id: dependency.source_id,
                target_id: dependency.target_id,
            });
        }
        if self.would_create_cycle(&dependency.source_id, &dependency.target_id) {
            debug!(
                source = %dependency.source_id,
                target = %dependency.target_id,
                "rejected dependency closing a cycle"
            );
            return Err(ScheduleError::WouldCreateCycle {
                source_id: dependency.source_id,
                target_id: dependency.target_id,
            });
        }
        self.dependencies.push(dependency);
        self.last_result = None;
        Ok(())
    }

    pub fn remove_dependency(&mut self, source_id: &str, target_id: &str) -> bool {
        let before = self.dependencies.len();
        self.dependencies.retain(|d| !d.connects(source_id, target_id));
        let removed = self.dependencies.len() != before;
        if removed {
            self.last_result = None;
        }
        removed
    }

    /// Computes the critical path without caching it.
    pub fn calculate(&self) -> Result<CriticalPathResult, CpmError> {
        calculate_critical_path(&self.activities, &self.milestones, &self.dependencies)
    }

    /// Recomputes the schedule, keeps the result and summarizes it.
    pub fn refresh(&mut self) -> Result<RefreshSummary, ScheduleError> {
        let result = self.calculate()?;
        let summary = RefreshSummary {
            node_count: result.nodes.len(),
            critical_count: result.critical_count(),
            critical_path: result.critical_path.clone(),
            project_duration: result.project_duration,
            project_finish: self.metadata.date_for_offset(result.project_duration),
        };
        info!(
            project = %self.metadata.project_name,
            nodes = summary.node_count,
            duration = summary.project_duration,
            "schedule refreshed"
        );
        self.last_result = Some(result);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_activity_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.upsert_activity(Activity::new("a", "Intake")).unwrap();
        s.upsert_activity(Activity::new("b", "Review")).unwrap();
        s
    }

    #[test]
    fn upsert_replaces_existing_activity() {
        let mut s = two_activity_schedule();
        s.upsert_activity(Activity::new("a", "Intake v2")).unwrap();
        assert_eq!(s.activities().len(), 2);
        assert_eq!(s.activities()[0].title, "Intake v2");
    }

    #[test]
    fn milestone_cannot_reuse_activity_id() {
        let mut s = two_activity_schedule();
        assert_eq!(
            s.upsert_milestone(Milestone::new("a", "Gate")),
            Err(ScheduleError::KindConflict("a".into()))
        );
    }

    #[test]
    fn delete_node_drops_attached_dependencies() {
        let mut s = two_activity_schedule();
        s.add_dependency(Dependency::new("a", "b")).unwrap();
        assert!(s.delete_node("b"));
        assert!(s.dependencies().is_empty());
        assert!(!s.delete_node("b"));
    }

    #[test]
    fn edits_clear_cached_result() {
        let mut s = two_activity_schedule();
        s.refresh().unwrap();
        assert!(s.last_result().is_some());
        s.add_dependency(Dependency::new("a", "b")).unwrap();
        assert!(s.last_result().is_none());
    }
}
