use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use super::ProjectSnapshot;
use crate::Schedule;
use crate::calculations::CriticalPathResult;
use crate::errors::PersistenceResult;
use crate::graph::NodeKind;
use crate::metadata::ScheduleMetadata;

pub fn save_project_to_json<P: AsRef<Path>>(schedule: &Schedule, path: P) -> PersistenceResult<()> {
    let snapshot = schedule.to_snapshot();
    snapshot.validate()?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    debug!(path = %path.as_ref().display(), "project snapshot written");
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path.as_ref())?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    snapshot.validate()?;
    debug!(
        path = %path.as_ref().display(),
        activities = snapshot.activities.len(),
        milestones = snapshot.milestones.len(),
        dependencies = snapshot.dependencies.len(),
        "project snapshot loaded"
    );
    Ok(Schedule::from_snapshot(snapshot))
}

#[derive(Serialize)]
struct NodeCsvRecord {
    id: String,
    title: String,
    kind: &'static str,
    duration: i64,
    earliest_start: i64,
    earliest_finish: i64,
    latest_start: i64,
    latest_finish: i64,
    total_float: i64,
    is_critical: bool,
    predecessors: String,
    successors: String,
    earliest_start_date: String,
    latest_finish_date: String,
}

fn format_offset(metadata: &ScheduleMetadata, offset: i64) -> String {
    metadata
        .date_for_offset(offset)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

/// Writes one row per node, in topological order. Date columns stay empty
/// when the project start date is unknown.
pub fn export_result_to_csv<P: AsRef<Path>>(
    result: &CriticalPathResult,
    metadata: &ScheduleMetadata,
    path: P,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for node in result.ordered_nodes() {
        writer.serialize(NodeCsvRecord {
            id: node.id.clone(),
            title: node.title.clone(),
            kind: match node.kind {
                NodeKind::Activity { .. } => "activity",
                NodeKind::Milestone => "milestone",
            },
            duration: node.duration,
            earliest_start: node.earliest_start,
            earliest_finish: node.earliest_finish,
            latest_start: node.latest_start,
            latest_finish: node.latest_finish,
            total_float: node.total_float,
            is_critical: node.is_critical,
            predecessors: node.predecessors.join(","),
            successors: node.successors.join(","),
            earliest_start_date: format_offset(metadata, node.earliest_start),
            latest_finish_date: format_offset(metadata, node.latest_finish),
        })?;
    }
    writer.flush()?;
    Ok(())
}
