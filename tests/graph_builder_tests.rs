use std::io;
use std::sync::{Arc, Mutex};

use chrono::{Days, NaiveDate};
use cpm_schedule::graph::GraphBuilder;
use cpm_schedule::{Activity, Dependency, DependencyType, Milestone, NodeKind, ScheduleDag};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn act(id: &str, days: u64) -> Activity {
    Activity::with_dates(id, id.to_uppercase(), origin(), origin() + Days::new(days))
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn build_with_captured_logs(
    activities: &[Activity],
    milestones: &[Milestone],
    deps: &[Dependency],
    level: Level,
) -> (ScheduleDag, String) {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(level)
        .finish();

    let dag = tracing::subscriber::with_default(subscriber, || {
        ScheduleDag::build(activities, milestones, deps)
    });

    let bytes = sink.0.lock().expect("lock output").clone();
    (dag, String::from_utf8(bytes).expect("utf8 log output"))
}

#[test]
fn builder_creates_nodes_and_links_both_endpoints() {
    // a -> {b, m}
    let activities = vec![act("a", 4), act("b", 2)];
    let milestones = vec![Milestone::new("m", "Award decision")];
    let deps = vec![
        Dependency::new("a", "b"),
        Dependency::new("a", "m").with_type(DependencyType::StartToStart),
    ];

    let dag = GraphBuilder::new(&activities, &milestones, &deps).build();

    assert_eq!(dag.node_count(), 3);
    assert_eq!(dag.edge_count(), 2);

    let a = dag.node_by_id("a").unwrap();
    assert_eq!(a.duration, 4);
    assert_eq!(a.successors, vec!["b".to_string(), "m".to_string()]);
    assert!(a.predecessors.is_empty());

    let m = dag.node_by_id("m").unwrap();
    assert_eq!(m.kind, NodeKind::Milestone);
    assert_eq!(m.duration, 0);
    assert_eq!(m.predecessors, vec!["a".to_string()]);
}

#[test]
fn dependencies_to_unknown_ids_are_dropped() {
    let activities = vec![act("a", 1), act("b", 1)];
    let deps = vec![
        Dependency::new("a", "b"),
        Dependency::new("a", "ghost"),
        Dependency::new("ghost", "b"),
    ];

    let dag = ScheduleDag::build(&activities, &[], &deps);

    assert_eq!(dag.edge_count(), 1);
    assert_eq!(dag.node_by_id("b").unwrap().predecessors, vec!["a".to_string()]);
    assert!(!dag.contains("ghost"));
}

#[test]
fn activity_without_dates_or_with_reversed_dates_has_zero_duration() {
    let mut reversed = act("r", 0);
    reversed.planned_start = Some(origin() + Days::new(10));
    let activities = vec![Activity::new("undated", "No dates yet"), reversed];

    let dag = ScheduleDag::build(&activities, &[], &[]);

    assert_eq!(dag.node_by_id("undated").unwrap().duration, 0);
    assert_eq!(dag.node_by_id("r").unwrap().duration, 0);
}

#[test]
fn repeated_ids_keep_the_first_record() {
    let activities = vec![act("a", 3), act("a", 9)];
    let milestones = vec![Milestone::new("a", "Clash")];

    let dag = ScheduleDag::build(&activities, &milestones, &[]);

    assert_eq!(dag.node_count(), 1);
    assert_eq!(dag.node_by_id("a").unwrap().duration, 3);
}

#[test]
fn parallel_dependencies_keep_both_edges_but_one_adjacency_entry() {
    let activities = vec![act("a", 3), act("b", 2)];
    let deps = vec![
        Dependency::new("a", "b"),
        Dependency::new("a", "b").with_type(DependencyType::FinishToFinish),
    ];

    let dag = ScheduleDag::build(&activities, &[], &deps);

    assert_eq!(dag.edge_count(), 2);
    assert_eq!(dag.node_by_id("a").unwrap().successors.len(), 1);
    assert_eq!(dag.node_by_id("b").unwrap().predecessors.len(), 1);
}

#[test]
fn builder_warns_about_every_repaired_record() {
    let mut reversed = act("r", 0);
    reversed.planned_start = Some(origin() + Days::new(10));
    let activities = vec![act("a", 1), reversed, act("a", 4)];
    let deps = vec![Dependency::new("a", "ghost"), Dependency::new("a", "r")];

    let (dag, logs) = build_with_captured_logs(&activities, &[], &deps, Level::WARN);

    assert_eq!(dag.edge_count(), 1);
    let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 3, "{logs}");
    assert!(logs.contains("planned end precedes planned start"), "{logs}");
    assert!(logs.contains("activity=r"), "{logs}");
    assert!(logs.contains("duplicate node id"), "{logs}");
    assert!(logs.contains("dependency references an unknown node"), "{logs}");
    assert!(logs.contains("target=ghost"), "{logs}");
}

#[test]
fn build_summary_reports_dropped_dependencies() {
    let activities = vec![act("a", 1), act("b", 1)];
    let deps = vec![
        Dependency::new("a", "b"),
        Dependency::new("ghost", "b"),
        Dependency::new("a", "phantom"),
    ];

    let (_, logs) = build_with_captured_logs(&activities, &[], &deps, Level::DEBUG);

    let summary = logs
        .lines()
        .find(|l| l.contains("schedule graph built"))
        .expect("summary line");
    assert!(summary.contains("edges=1"), "{summary}");
    assert!(summary.contains("dropped=2"), "{summary}");
}

#[test]
fn clean_input_builds_without_warnings() {
    let activities = vec![act("a", 2), act("b", 3)];
    let deps = vec![Dependency::new("a", "b")];

    let (_, logs) = build_with_captured_logs(&activities, &[], &deps, Level::WARN);

    assert!(logs.trim().is_empty(), "{logs}");
}
