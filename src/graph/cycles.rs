//! Directed cycle detection.
//!
//! The search is an iterative depth-first traversal with an explicit frame
//! stack, so deep dependency chains cannot overflow the call stack. Every
//! back edge into the current path yields one cycle: the path segment from
//! the revisited node to the node that closed it, inclusive. A cycle that is
//! reachable from several entry points may be reported more than once.

use petgraph::graph::NodeIndex;
use std::collections::HashSet;

use super::node::{DependencyEdge, Node};
use super::schedule_dag::ScheduleDag;
use crate::activity::Milestone;
use crate::dependency::Dependency;

/// Returns every cycle found, each as an ordered list of node ids.
pub fn detect_cycles(dag: &ScheduleDag) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();

    for root in dag.node_indices() {
        if visited.contains(&root) {
            continue;
        }

        let mut path: Vec<NodeIndex> = vec![root];
        let mut on_path: HashSet<NodeIndex> = HashSet::from([root]);
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> =
            vec![(root, dag.successor_indices(root), 0)];
        visited.insert(root);

        while let Some((node, children, next)) = stack.last_mut() {
            let node = *node;
            if *next >= children.len() {
                stack.pop();
                path.pop();
                on_path.remove(&node);
                continue;
            }

            let child = children[*next];
            *next += 1;

            if on_path.contains(&child) {
                if let Some(pos) = path.iter().position(|&n| n == child) {
                    cycles.push(
                        path[pos..]
                            .iter()
                            .map(|&ix| dag.node(ix).id.clone())
                            .collect(),
                    );
                }
                continue;
            }

            if !visited.insert(child) {
                continue;
            }

            path.push(child);
            on_path.insert(child);
            stack.push((child, dag.successor_indices(child), 0));
        }
    }

    cycles
}

/// Answers whether adding `candidate_source -> candidate_target` to the
/// graph spanned by `existing` would close a cycle. Nothing outside this
/// call is modified.
pub fn would_create_cycle(
    existing: &[Dependency],
    candidate_source: &str,
    candidate_target: &str,
) -> bool {
    let mut dag = ScheduleDag::new();
    let endpoints = existing
        .iter()
        .flat_map(|d| [d.source_id.as_str(), d.target_id.as_str()])
        .chain([candidate_source, candidate_target]);
    for id in endpoints {
        if !dag.contains(id) {
            dag.add_node(Node::from_milestone(&Milestone::new(id, "")));
        }
    }

    for dep in existing {
        dag.add_dependency(&dep.source_id, &dep.target_id, DependencyEdge::default());
    }
    dag.add_dependency(candidate_source, candidate_target, DependencyEdge::default());

    !detect_cycles(&dag).is_empty()
}
