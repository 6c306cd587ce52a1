//! Error types raised by the engine and its hosting helpers.

use thiserror::Error;

/// Errors produced by a critical-path computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    /// The dependency graph contains at least one directed cycle, so no
    /// topological order exists. `cycle` holds one representative cycle as
    /// an ordered list of node ids (empty if none could be traced).
    #[error("circular dependencies detected: {}", format_cycle(.cycle))]
    CyclicGraph { cycle: Vec<String> },
}

impl CpmError {
    pub fn cycle(&self) -> &[String] {
        match self {
            CpmError::CyclicGraph { cycle } => cycle,
        }
    }
}

fn format_cycle(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => {
            let mut path = cycle.join(" -> ");
            path.push_str(" -> ");
            path.push_str(first);
            path
        }
        None => "cycle could not be traced".to_string(),
    }
}

/// Errors raised while editing a [`crate::Schedule`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("dependency {source_id} -> {target_id} would create a circular dependency")]
    WouldCreateCycle {
        source_id: String,
        target_id: String,
    },

    #[error("node {0} not found")]
    UnknownNode(String),

    #[error("dependency {source_id} -> {target_id} already exists")]
    DuplicateDependency {
        source_id: String,
        target_id: String,
    },

    #[error("node id {0} is already used by a node of another kind")]
    KindConflict(String),

    #[error(transparent)]
    Cpm(#[from] CpmError),
}

/// Errors raised while reading or writing project snapshots and exports.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;
