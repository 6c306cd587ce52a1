//! Critical-path runs across many independent projects.

use rayon::prelude::*;

use crate::calculations::CriticalPathResult;
use crate::errors::CpmError;
use crate::snapshot::ProjectSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioEntry {
    pub project_name: String,
    pub outcome: Result<CriticalPathResult, CpmError>,
}

impl PortfolioEntry {
    pub fn project_duration(&self) -> Option<i64> {
        self.outcome.as_ref().ok().map(|r| r.project_duration)
    }
}

/// Schedules every project on the rayon pool. Each project builds and owns
/// its own graph; entries come back in input order.
pub fn calculate_portfolio(projects: &[ProjectSnapshot]) -> Vec<PortfolioEntry> {
    projects
        .par_iter()
        .map(|project| PortfolioEntry {
            project_name: project.metadata.project_name.clone(),
            outcome: project.calculate(),
        })
        .collect()
}
