use petgraph::graph::NodeIndex;
use std::collections::{HashMap, VecDeque};
use tracing::warn;

use super::cycles::detect_cycles;
use super::schedule_dag::ScheduleDag;
use crate::errors::CpmError;

/// Orders every node so that each one follows all of its predecessors
/// (Kahn's algorithm).
///
/// Zero in-degree nodes are seeded in insertion order and the queue is
/// FIFO, so identical graphs always produce identical orders. When the graph
/// holds a cycle no partial order is returned; the error carries the first
/// cycle the detector finds.
pub fn topological_sort(dag: &ScheduleDag) -> Result<Vec<NodeIndex>, CpmError> {
    let mut in_degree: HashMap<NodeIndex, usize> = dag
        .node_indices()
        .map(|ix| (ix, dag.node(ix).predecessors.len()))
        .collect();

    let mut queue: VecDeque<NodeIndex> = dag
        .node_indices()
        .filter(|ix| in_degree[ix] == 0)
        .collect();

    let mut order = Vec::with_capacity(dag.node_count());
    while let Some(ix) = queue.pop_front() {
        order.push(ix);
        for succ in dag.successor_indices(ix) {
            if let Some(deg) = in_degree.get_mut(&succ) {
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(succ);
                }
            }
        }
    }

    if order.len() < dag.node_count() {
        let cycle = detect_cycles(dag).into_iter().next().unwrap_or_default();
        warn!(
            ordered = order.len(),
            total = dag.node_count(),
            cycle = ?cycle,
            "schedule graph is not acyclic"
        );
        return Err(CpmError::CyclicGraph { cycle });
    }

    Ok(order)
}

/// Same as [`topological_sort`] but yields node ids.
pub fn topological_ids(dag: &ScheduleDag) -> Result<Vec<String>, CpmError> {
    Ok(topological_sort(dag)?
        .into_iter()
        .map(|ix| dag.node(ix).id.clone())
        .collect())
}
