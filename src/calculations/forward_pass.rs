use petgraph::graph::NodeIndex;
use std::collections::HashMap;

use crate::graph::ScheduleDag;

/// Earliest start/finish computation.
pub struct ForwardPass<'a> {
    dag: &'a ScheduleDag,
}

impl<'a> ForwardPass<'a> {
    pub fn new(dag: &'a ScheduleDag) -> Self {
        Self { dag }
    }

    /// Walks `order` (a topological order of the whole graph) and returns the
    /// earliest `(start, finish)` of every node.
    ///
    /// A node without predecessors starts at day 0. Any other node starts at
    /// the latest of the constraints its incoming edges impose.
    pub fn execute(&self, order: &[NodeIndex]) -> HashMap<NodeIndex, (i64, i64)> {
        let mut early: HashMap<NodeIndex, (i64, i64)> = HashMap::with_capacity(order.len());

        for &ix in order {
            let duration = self.dag.node(ix).duration;
            let earliest_start = self
                .dag
                .incoming(ix)
                .filter_map(|(pred, edge)| {
                    early
                        .get(&pred)
                        .map(|&times| edge.earliest_start_after(times, duration))
                })
                .max()
                .unwrap_or(0);
            early.insert(ix, (earliest_start, earliest_start.saturating_add(duration)));
        }

        early
    }
}

/// Largest earliest finish over the nodes without successors.
///
/// Not clamped at zero: negative lags can pull every sink before day 0, and
/// the duration then comes out negative.
pub fn project_duration(dag: &ScheduleDag, early: &HashMap<NodeIndex, (i64, i64)>) -> i64 {
    dag.node_indices()
        .filter(|&ix| dag.node(ix).is_sink())
        .filter_map(|ix| early.get(&ix).map(|&(_, finish)| finish))
        .max()
        .unwrap_or(0)
}
