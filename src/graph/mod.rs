//! Schedule graph model and the structural algorithms run over it.
//!
//! - [`node`] defines nodes (activities and milestones) and typed edges.
//! - [`schedule_dag`] is the arena holding them.
//! - [`builder`] turns flat record snapshots into a graph.
//! - [`cycles`] finds directed cycles and guards candidate edges.
//! - [`topological`] orders nodes and rejects cyclic graphs.

pub mod builder;
pub mod cycles;
pub mod node;
pub mod schedule_dag;
pub mod topological;

pub use builder::GraphBuilder;
pub use cycles::{detect_cycles, would_create_cycle};
pub use node::{DependencyEdge, Node, NodeKind};
pub use schedule_dag::ScheduleDag;
pub use topological::{topological_ids, topological_sort};
