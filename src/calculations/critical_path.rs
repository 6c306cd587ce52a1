use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::backward_pass::BackwardPass;
use super::forward_pass::{ForwardPass, project_duration};
use crate::activity::{Activity, Milestone};
use crate::dependency::Dependency;
use crate::errors::CpmError;
use crate::graph::{GraphBuilder, Node, ScheduleDag, topological_sort};

/// Outcome of a critical-path run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPathResult {
    /// Every scheduled node keyed by id.
    pub nodes: BTreeMap<String, Node>,
    /// Ids of all zero-float nodes, in topological order. Tied longest paths
    /// all contribute, so this is not necessarily a single chain.
    pub critical_path: Vec<String>,
    /// Ids of all nodes in the order the passes visited them.
    pub topological_order: Vec<String>,
    pub project_duration: i64,
}

impl CriticalPathResult {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(|n| n.is_critical)
    }

    /// Critical nodes in critical-path order.
    pub fn critical_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.critical_path.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Nodes in topological order.
    pub fn ordered_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.topological_order
            .iter()
            .filter_map(|id| self.nodes.get(id))
    }

    pub fn critical_count(&self) -> usize {
        self.critical_path.len()
    }
}

/// Builds the graph for the given snapshot and schedules it.
pub fn calculate_critical_path(
    activities: &[Activity],
    milestones: &[Milestone],
    dependencies: &[Dependency],
) -> Result<CriticalPathResult, CpmError> {
    let dag = GraphBuilder::new(activities, milestones, dependencies).build();
    schedule_dag(dag)
}

/// Schedules an already built graph, consuming it.
pub fn schedule_dag(mut dag: ScheduleDag) -> Result<CriticalPathResult, CpmError> {
    if dag.is_empty() {
        return Ok(CriticalPathResult::default());
    }

    let order = topological_sort(&dag)?;

    let early = ForwardPass::new(&dag).execute(&order);
    let duration = project_duration(&dag, &early);
    let late = BackwardPass::new(&dag).execute(&order, duration);

    let mut critical_path = Vec::new();
    let mut topological_order = Vec::with_capacity(order.len());
    for &ix in &order {
        let (es, ef) = early[&ix];
        let (ls, lf) = late[&ix];
        let node = dag.node_mut(ix);
        node.earliest_start = es;
        node.earliest_finish = ef;
        node.latest_start = ls;
        node.latest_finish = lf;
        node.total_float = ls.saturating_sub(es);
        node.is_critical = node.total_float == 0;

        if node.total_float < 0 {
            warn!(
                node = %node.id,
                total_float = node.total_float,
                "negative float; dependency constraints cannot all be met"
            );
        }
        if node.is_critical {
            critical_path.push(node.id.clone());
        }
        topological_order.push(node.id.clone());
    }

    debug!(
        nodes = order.len(),
        critical = critical_path.len(),
        project_duration = duration,
        "critical path computed"
    );

    let nodes = dag
        .into_nodes()
        .into_iter()
        .map(|node| (node.id.clone(), node))
        .collect();

    Ok(CriticalPathResult {
        nodes,
        critical_path,
        topological_order,
        project_duration: duration,
    })
}
