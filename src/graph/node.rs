use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::{Activity, Milestone};
use crate::dependency::DependencyType;

/// Kind-specific data carried by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Activity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        planned_start: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        planned_end: Option<NaiveDate>,
    },
    Milestone,
}

/// A schedulable node. Timing fields are day offsets from the project
/// origin and stay zero until a critical-path run fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub title: String,
    pub kind: NodeKind,
    pub duration: i64,
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
    pub total_float: i64,
    pub is_critical: bool,
    pub predecessors: Vec<String>,
    pub successors: Vec<String>,
}

impl Node {
    fn unscheduled(id: String, title: String, kind: NodeKind, duration: i64) -> Self {
        Self {
            id,
            title,
            kind,
            duration,
            earliest_start: 0,
            earliest_finish: 0,
            latest_start: 0,
            latest_finish: 0,
            total_float: 0,
            is_critical: false,
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    pub fn from_activity(activity: &Activity) -> Self {
        Self::unscheduled(
            activity.id.clone(),
            activity.title.clone(),
            NodeKind::Activity {
                planned_start: activity.planned_start,
                planned_end: activity.planned_end,
            },
            activity.planned_duration_days(),
        )
    }

    pub fn from_milestone(milestone: &Milestone) -> Self {
        Self::unscheduled(
            milestone.id.clone(),
            milestone.title.clone(),
            NodeKind::Milestone,
            0,
        )
    }

    pub fn is_milestone(&self) -> bool {
        matches!(self.kind, NodeKind::Milestone)
    }

    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub fn is_sink(&self) -> bool {
        self.successors.is_empty()
    }
}

/// Edge weight stored in the graph arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyEdge {
    pub dependency_type: DependencyType,
    pub lag_days: i64,
}

impl DependencyEdge {
    pub fn new(dependency_type: DependencyType, lag_days: i64) -> Self {
        Self {
            dependency_type,
            lag_days,
        }
    }

    /// Earliest start a successor of `duration` days may take, given the
    /// predecessor's earliest `(start, finish)`. Saturates at the `i64` bounds.
    pub fn earliest_start_after(&self, predecessor: (i64, i64), duration: i64) -> i64 {
        let (pred_start, pred_finish) = predecessor;
        match self.dependency_type {
            DependencyType::FinishToStart => pred_finish.saturating_add(self.lag_days),
            DependencyType::StartToStart => pred_start.saturating_add(self.lag_days),
            DependencyType::FinishToFinish => pred_finish
                .saturating_add(self.lag_days)
                .saturating_sub(duration),
            DependencyType::StartToFinish => pred_start
                .saturating_add(self.lag_days)
                .saturating_sub(duration),
        }
    }

    /// Latest finish a predecessor of `duration` days may take, given the
    /// successor's latest `(start, finish)`.
    pub fn latest_finish_before(&self, successor: (i64, i64), duration: i64) -> i64 {
        let (succ_start, succ_finish) = successor;
        match self.dependency_type {
            DependencyType::FinishToStart => succ_start.saturating_sub(self.lag_days),
            DependencyType::StartToStart => succ_start
                .saturating_sub(self.lag_days)
                .saturating_add(duration),
            DependencyType::FinishToFinish => succ_finish.saturating_sub(self.lag_days),
            DependencyType::StartToFinish => succ_finish
                .saturating_sub(self.lag_days)
                .saturating_add(duration),
        }
    }
}
