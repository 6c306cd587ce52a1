pub mod activity;
pub mod calculations;
pub mod dependency;
pub mod errors;
pub mod graph;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod metadata;
pub mod portfolio;
pub mod schedule;
pub mod snapshot;

pub use activity::{Activity, Milestone};
pub use calculations::{CriticalPathResult, calculate_critical_path};
pub use dependency::{Dependency, DependencyType, EndpointKind, MAX_LAG_DAYS};
pub use errors::{CpmError, PersistenceError, ScheduleError};
pub use graph::{Node, NodeKind, ScheduleDag, detect_cycles, topological_sort, would_create_cycle};
pub use metadata::ScheduleMetadata;
pub use portfolio::{PortfolioEntry, calculate_portfolio};
pub use schedule::{RefreshSummary, Schedule};
pub use snapshot::{
    ProjectSnapshot, export_result_to_csv, load_project_from_json, save_project_to_json,
};
