use tracing::{debug, warn};

use super::node::{DependencyEdge, Node};
use super::schedule_dag::ScheduleDag;
use crate::activity::{Activity, Milestone};
use crate::dependency::Dependency;

/// Builds a [`ScheduleDag`] from flat record snapshots.
///
/// Building never fails. Dependencies pointing at unknown ids are dropped,
/// repeated node ids keep the first record, and activities with an end date
/// before their start date get a zero duration. Each of these is logged.
pub struct GraphBuilder<'a> {
    activities: &'a [Activity],
    milestones: &'a [Milestone],
    dependencies: &'a [Dependency],
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        activities: &'a [Activity],
        milestones: &'a [Milestone],
        dependencies: &'a [Dependency],
    ) -> Self {
        Self {
            activities,
            milestones,
            dependencies,
        }
    }

    pub fn build(&self) -> ScheduleDag {
        let mut dag = ScheduleDag::new();

        for activity in self.activities {
            if activity.has_inverted_dates() {
                warn!(
                    activity = %activity.id,
                    planned_start = ?activity.planned_start,
                    planned_end = ?activity.planned_end,
                    "planned end precedes planned start; using zero duration"
                );
            }
            if dag.add_node(Node::from_activity(activity)).is_none() {
                warn!(id = %activity.id, "duplicate node id; keeping the first record");
            }
        }

        for milestone in self.milestones {
            if dag.add_node(Node::from_milestone(milestone)).is_none() {
                warn!(id = %milestone.id, "duplicate node id; keeping the first record");
            }
        }

        let mut dropped = 0usize;
        for dep in self.dependencies {
            let edge = DependencyEdge::new(dep.dependency_type, dep.lag_days);
            if !dag.add_dependency(&dep.source_id, &dep.target_id, edge) {
                dropped += 1;
                warn!(
                    source = %dep.source_id,
                    target = %dep.target_id,
                    "dependency references an unknown node; dropping it"
                );
            }
        }

        debug!(
            nodes = dag.node_count(),
            edges = dag.edge_count(),
            dropped,
            "schedule graph built"
        );
        dag
    }
}

impl ScheduleDag {
    /// Shorthand for `GraphBuilder::new(..).build()`.
    pub fn build(
        activities: &[Activity],
        milestones: &[Milestone],
        dependencies: &[Dependency],
    ) -> Self {
        GraphBuilder::new(activities, milestones, dependencies).build()
    }
}
