use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::node::{DependencyEdge, Node};

/// Arena of schedule nodes with typed dependency edges.
///
/// Nodes live in a petgraph `DiGraph`; callers address them either by
/// `NodeIndex` or by their string id through `id_to_index`. Each node also
/// keeps its predecessor and successor ids, deduplicated, in the order the
/// edges were added.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDag {
    graph: DiGraph<Node, DependencyEdge>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl ScheduleDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node. Returns `None` and leaves the graph untouched when the
    /// id is already present.
    pub fn add_node(&mut self, node: Node) -> Option<NodeIndex> {
        if self.id_to_index.contains_key(&node.id) {
            return None;
        }
        let id = node.id.clone();
        let ix = self.graph.add_node(node);
        self.id_to_index.insert(id, ix);
        Some(ix)
    }

    /// Records `source -> target` on both endpoints and as a typed edge.
    /// Returns `false` when either id is unknown.
    pub fn add_dependency(&mut self, source_id: &str, target_id: &str, edge: DependencyEdge) -> bool {
        let (Some(&u), Some(&v)) = (self.id_to_index.get(source_id), self.id_to_index.get(target_id))
        else {
            return false;
        };

        self.graph.add_edge(u, v, edge);

        let source = &mut self.graph[u];
        if !source.successors.iter().any(|s| s == target_id) {
            source.successors.push(target_id.to_string());
        }
        let target = &mut self.graph[v];
        if !target.predecessors.iter().any(|p| p == source_id) {
            target.predecessors.push(source_id.to_string());
        }
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    pub fn node(&self, ix: NodeIndex) -> &Node {
        &self.graph[ix]
    }

    pub fn node_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.graph[ix]
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|ix| &self.graph[ix])
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_weights()
    }

    /// Successor indices of `ix`, one per distinct successor, in edge
    /// insertion order.
    pub fn successor_indices(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        self.graph[ix]
            .successors
            .iter()
            .filter_map(|id| self.index_of(id))
            .collect()
    }

    /// Every typed edge entering `ix`, paired with its source.
    pub fn incoming(&self, ix: NodeIndex) -> impl Iterator<Item = (NodeIndex, &DependencyEdge)> + '_ {
        self.graph
            .edges_directed(ix, Direction::Incoming)
            .map(|e| (e.source(), e.weight()))
    }

    /// Every typed edge leaving `ix`, paired with its target.
    pub fn outgoing(&self, ix: NodeIndex) -> impl Iterator<Item = (NodeIndex, &DependencyEdge)> + '_ {
        self.graph
            .edges_directed(ix, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
    }

    pub fn into_nodes(self) -> Vec<Node> {
        let (nodes, _) = self.graph.into_nodes_edges();
        nodes.into_iter().map(|n| n.weight).collect()
    }
}
