use petgraph::graph::NodeIndex;
use std::collections::HashMap;

use crate::graph::ScheduleDag;

/// Latest start/finish computation.
pub struct BackwardPass<'a> {
    dag: &'a ScheduleDag,
}

impl<'a> BackwardPass<'a> {
    pub fn new(dag: &'a ScheduleDag) -> Self {
        Self { dag }
    }

    /// Walks `order` backwards and returns the latest `(start, finish)` of
    /// every node. Sinks finish at `project_duration`; every other node
    /// finishes by the tightest constraint its outgoing edges impose.
    pub fn execute(
        &self,
        order: &[NodeIndex],
        project_duration: i64,
    ) -> HashMap<NodeIndex, (i64, i64)> {
        let mut late: HashMap<NodeIndex, (i64, i64)> = HashMap::with_capacity(order.len());

        for &ix in order.iter().rev() {
            let duration = self.dag.node(ix).duration;
            let latest_finish = self
                .dag
                .outgoing(ix)
                .filter_map(|(succ, edge)| {
                    late.get(&succ)
                        .map(|&times| edge.latest_finish_before(times, duration))
                })
                .min()
                .unwrap_or(project_duration);
            late.insert(ix, (latest_finish.saturating_sub(duration), latest_finish));
        }

        late
    }
}
