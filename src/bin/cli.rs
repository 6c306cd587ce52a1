use chrono::NaiveDate;
use cpm_schedule::{
    Activity, CriticalPathResult, Dependency, DependencyType, EndpointKind, Milestone, NodeKind,
    Schedule, ScheduleMetadata, export_result_to_csv, load_project_from_json, logging,
    save_project_to_json,
};
use std::io::{self, Write};

fn parse_optional_date(s: &str) -> Result<Option<NaiveDate>, String> {
    if s == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date '{s}' (YYYY-MM-DD or -)"))
}

fn render_result_as_text_table(result: &CriticalPathResult, metadata: &ScheduleMetadata) -> String {
    let header = [
        "id", "title", "kind", "dur", "ES", "EF", "LS", "LF", "float", "crit", "start",
    ];
    let rows: Vec<Vec<String>> = result
        .ordered_nodes()
        .map(|n| {
            vec![
                n.id.clone(),
                n.title.clone(),
                match n.kind {
                    NodeKind::Activity { .. } => "activity".to_string(),
                    NodeKind::Milestone => "milestone".to_string(),
                },
                n.duration.to_string(),
                n.earliest_start.to_string(),
                n.earliest_finish.to_string(),
                n.latest_start.to_string(),
                n.latest_finish.to_string(),
                n.total_float.to_string(),
                if n.is_critical { "*".to_string() } else { String::new() },
                metadata
                    .date_for_offset(n.earliest_start)
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            let pad = widths[ci].saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                     Show this help\n  show                                     List records and the last computed schedule\n  activity <id> <start|-> <end|-> [title]  Upsert an activity (dates YYYY-MM-DD)\n  milestone <id> [title]                   Upsert a milestone\n  dep <src> <tgt> [fs|ss|ff|sf] [lag]      Add a dependency (rejected if it closes a cycle)\n  undep <src> <tgt>                        Remove a dependency\n  delete <id>                              Delete a node and its dependencies\n  check <src> <tgt>                        Report whether a dependency would close a cycle\n  compute                                  Run the critical path calculation\n  meta show                                Show project metadata\n  meta name <text...>                      Update project name\n  meta start <YYYY-MM-DD|->                Set the calendar date of day 0\n  save json <path>                         Write the project snapshot\n  load json <path>                         Read a project snapshot\n  export csv <path>                        Write the computed schedule as CSV\n  quit|exit                                Exit"
    );
}

fn print_metadata(schedule: &Schedule) {
    let metadata = schedule.metadata();
    println!("Project name       : {}", metadata.project_name);
    println!("Project description: {}", metadata.project_description);
    match metadata.project_start_date {
        Some(date) => println!("Project start date : {}", date),
        None => println!("Project start date : (not set)"),
    }
}

fn print_records(schedule: &Schedule) {
    println!("Activities ({}):", schedule.activities().len());
    for a in schedule.activities() {
        let fmt_date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "  {} {} .. {} ({}d) {}",
            a.id,
            fmt_date(a.planned_start),
            fmt_date(a.planned_end),
            a.planned_duration_days(),
            a.title
        );
    }
    println!("Milestones ({}):", schedule.milestones().len());
    for m in schedule.milestones() {
        println!("  {} {}", m.id, m.title);
    }
    println!("Dependencies ({}):", schedule.dependencies().len());
    for d in schedule.dependencies() {
        println!(
            "  {} -> {} {} lag={}",
            d.source_id,
            d.target_id,
            d.dependency_type.abbreviation(),
            d.lag_days
        );
    }
}

fn endpoint_kind(schedule: &Schedule, id: &str) -> EndpointKind {
    if schedule.milestones().iter().any(|m| m.id == id) {
        EndpointKind::Milestone
    } else {
        EndpointKind::Activity
    }
}

fn main() {
    logging::init_logging();

    let mut schedule = Schedule::new();

    println!("CPM Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => {
                print_records(&schedule);
                if let Some(result) = schedule.last_result() {
                    println!("{}", render_result_as_text_table(result, schedule.metadata()));
                }
            }
            "activity" => {
                let (Some(id), Some(start_s), Some(end_s)) = (parts.next(), parts.next(), parts.next())
                else {
                    println!("Usage: activity <id> <start|-> <end|-> [title]");
                    continue;
                };
                let dates = parse_optional_date(start_s)
                    .and_then(|start| parse_optional_date(end_s).map(|end| (start, end)));
                let (planned_start, planned_end) = match dates {
                    Ok(v) => v,
                    Err(msg) => {
                        println!("{msg}");
                        continue;
                    }
                };
                let title = parts.collect::<Vec<_>>().join(" ");
                let activity = Activity {
                    id: id.to_string(),
                    title,
                    planned_start,
                    planned_end,
                };
                match schedule.upsert_activity(activity) {
                    Ok(()) => println!("Activity {id} upserted."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "milestone" => {
                let Some(id) = parts.next() else {
                    println!("Usage: milestone <id> [title]");
                    continue;
                };
                let title = parts.collect::<Vec<_>>().join(" ");
                match schedule.upsert_milestone(Milestone::new(id, title)) {
                    Ok(()) => println!("Milestone {id} upserted."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "dep" => {
                let (Some(src), Some(tgt)) = (parts.next(), parts.next()) else {
                    println!("Usage: dep <src> <tgt> [fs|ss|ff|sf] [lag]");
                    continue;
                };
                let dependency_type = match parts.next().map(str::parse::<DependencyType>) {
                    None => DependencyType::FinishToStart,
                    Some(Ok(t)) => t,
                    Some(Err(e)) => {
                        println!("{e}");
                        continue;
                    }
                };
                let lag_days = match parts.next().map(str::parse::<i64>) {
                    None => 0,
                    Some(Ok(v)) => v,
                    Some(Err(_)) => {
                        println!("Invalid lag");
                        continue;
                    }
                };
                let dependency = Dependency::new(src, tgt)
                    .with_type(dependency_type)
                    .with_lag(lag_days)
                    .with_kinds(endpoint_kind(&schedule, src), endpoint_kind(&schedule, tgt));
                match schedule.add_dependency(dependency) {
                    Ok(()) => println!("Dependency {src} -> {tgt} added."),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "undep" => match (parts.next(), parts.next()) {
                (Some(src), Some(tgt)) => {
                    if schedule.remove_dependency(src, tgt) {
                        println!("Dependency {src} -> {tgt} removed.");
                    } else {
                        println!("Dependency {src} -> {tgt} not found.");
                    }
                }
                _ => println!("Usage: undep <src> <tgt>"),
            },
            "delete" => match parts.next() {
                Some(id) => {
                    if schedule.delete_node(id) {
                        println!("Deleted node {id}.");
                    } else {
                        println!("Node {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "check" => match (parts.next(), parts.next()) {
                (Some(src), Some(tgt)) => {
                    if schedule.would_create_cycle(src, tgt) {
                        println!("{src} -> {tgt} would create a cycle.");
                    } else {
                        println!("{src} -> {tgt} is safe.");
                    }
                }
                _ => println!("Usage: check <src> <tgt>"),
            },
            "compute" => match schedule.refresh() {
                Ok(summary) => {
                    println!("Refreshed ({})", summary.to_cli_summary());
                    if let Some(result) = schedule.last_result() {
                        println!("{}", render_result_as_text_table(result, schedule.metadata()));
                    }
                }
                Err(e) => println!("Refresh error: {e}"),
            },
            "meta" => match parts.next() {
                Some("show") => print_metadata(&schedule),
                Some("name") => {
                    let name = parts.collect::<Vec<_>>().join(" ");
                    if name.is_empty() {
                        println!("Usage: meta name <text...>");
                    } else {
                        schedule.set_project_name(name);
                        println!("Project name updated.");
                    }
                }
                Some("start") => match parts.next().map(parse_optional_date) {
                    Some(Ok(date)) => {
                        schedule.set_project_start_date(date);
                        println!("Project start date updated.");
                    }
                    Some(Err(msg)) => println!("{msg}"),
                    None => println!("Usage: meta start <YYYY-MM-DD|->"),
                },
                _ => println!("Usage: meta <show|name|start> ..."),
            },
            "save" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match save_project_to_json(&schedule, path) {
                    Ok(()) => println!("Project saved to {path}."),
                    Err(e) => println!("Save error: {e}"),
                },
                _ => println!("Usage: save json <path>"),
            },
            "load" => match (parts.next(), parts.next()) {
                (Some("json"), Some(path)) => match load_project_from_json(path) {
                    Ok(loaded) => {
                        schedule = loaded;
                        println!("Project loaded from {path}.");
                    }
                    Err(e) => println!("Load error: {e}"),
                },
                _ => println!("Usage: load json <path>"),
            },
            "export" => match (parts.next(), parts.next()) {
                (Some("csv"), Some(path)) => {
                    if schedule.last_result().is_none() {
                        if let Err(e) = schedule.refresh() {
                            println!("Refresh error: {e}");
                            continue;
                        }
                    }
                    if let Some(result) = schedule.last_result() {
                        match export_result_to_csv(result, schedule.metadata(), path) {
                            Ok(()) => println!("Schedule exported to {path}."),
                            Err(e) => println!("Export error: {e}"),
                        }
                    }
                }
                _ => println!("Usage: export csv <path>"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
        }
    }
}
