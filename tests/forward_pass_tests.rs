use chrono::{Days, NaiveDate};
use cpm_schedule::calculations::ForwardPass;
use cpm_schedule::{
    Activity, Dependency, DependencyType, Milestone, ScheduleDag, calculate_critical_path,
    topological_sort,
};

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn act(id: &str, days: u64) -> Activity {
    Activity::with_dates(id, id, origin(), origin() + Days::new(days))
}

fn early_of(activities: &[Activity], deps: &[Dependency], id: &str) -> (i64, i64) {
    let result = calculate_critical_path(activities, &[], deps).unwrap();
    let node = result.node(id).unwrap();
    (node.earliest_start, node.earliest_finish)
}

#[test]
fn forward_pass_computes_early_times_across_dag() {
    // 1(2d) -> {2(3d), 3(1d)} -> 4(2d)
    let activities = vec![act("1", 2), act("2", 3), act("3", 1), act("4", 2)];
    let deps = vec![
        Dependency::new("1", "2"),
        Dependency::new("1", "3"),
        Dependency::new("2", "4"),
        Dependency::new("3", "4"),
    ];
    let dag = ScheduleDag::build(&activities, &[], &deps);
    let order = topological_sort(&dag).unwrap();

    let early = ForwardPass::new(&dag).execute(&order);
    let at = |id: &str| early[&dag.index_of(id).unwrap()];

    assert_eq!(at("1"), (0, 2));
    assert_eq!(at("2"), (2, 5));
    assert_eq!(at("3"), (2, 3));
    assert_eq!(at("4"), (5, 7));
}

#[test]
fn linear_chain_duration_is_sum_of_durations() {
    let activities = vec![act("a", 4), act("b", 6), act("c", 2)];
    let deps = vec![Dependency::new("a", "b"), Dependency::new("b", "c")];

    let result = calculate_critical_path(&activities, &[], &deps).unwrap();

    assert_eq!(result.project_duration, 12);
    for id in ["a", "b", "c"] {
        let node = result.node(id).unwrap();
        assert_eq!(node.total_float, 0, "{id}");
        assert!(node.is_critical, "{id}");
    }
}

#[test]
fn finish_to_start_lag_shifts_successor_by_exactly_the_lag() {
    let activities = vec![act("a", 3), act("b", 2)];
    let base = early_of(&activities, &[Dependency::new("a", "b")], "b");
    let lagged = early_of(&activities, &[Dependency::new("a", "b").with_lag(4)], "b");

    assert_eq!(base, (3, 5));
    assert_eq!(lagged.0, base.0 + 4);
    assert_eq!(lagged.1, base.1 + 4);
}

#[test]
fn negative_lag_allows_overlap() {
    let activities = vec![act("a", 5), act("b", 3)];
    let deps = vec![Dependency::new("a", "b").with_lag(-2)];
    assert_eq!(early_of(&activities, &deps, "b"), (3, 6));
}

#[test]
fn start_to_start_ignores_predecessor_duration() {
    for pred_days in [1, 10, 30] {
        let activities = vec![act("p", pred_days), act("s", 3)];
        let deps = vec![
            Dependency::new("p", "s")
                .with_type(DependencyType::StartToStart)
                .with_lag(2),
        ];
        assert_eq!(early_of(&activities, &deps, "s"), (2, 5), "pred {pred_days}d");
    }
}

#[test]
fn finish_to_finish_aligns_finishes() {
    let activities = vec![act("p", 5), act("s", 2)];
    let deps = vec![Dependency::new("p", "s").with_type(DependencyType::FinishToFinish)];
    assert_eq!(early_of(&activities, &deps, "s"), (3, 5));
}

#[test]
fn start_to_finish_ties_successor_finish_to_predecessor_start() {
    let activities = vec![act("p", 4), act("s", 2)];
    let deps = vec![
        Dependency::new("p", "s")
            .with_type(DependencyType::StartToFinish)
            .with_lag(6),
    ];
    assert_eq!(early_of(&activities, &deps, "s"), (4, 6));
}

#[test]
fn tightest_predecessor_constraint_wins() {
    // c waits for a's finish (5) and for b's start + 7 (7).
    let activities = vec![act("a", 5), act("b", 1), act("c", 1)];
    let deps = vec![
        Dependency::new("a", "c"),
        Dependency::new("b", "c")
            .with_type(DependencyType::StartToStart)
            .with_lag(7),
    ];
    assert_eq!(early_of(&activities, &deps, "c"), (7, 8));
}

#[test]
fn negative_lags_can_make_the_project_duration_negative() {
    let activities = vec![act("a", 1)];
    let milestones = vec![Milestone::new("m", "Budget approved")];
    let deps = vec![Dependency::new("m", "a").with_lag(-5)];

    let result = calculate_critical_path(&activities, &milestones, &deps).unwrap();

    let a = result.node("a").unwrap();
    assert_eq!((a.earliest_start, a.earliest_finish), (-5, -4));
    assert_eq!(result.project_duration, -4);
}

#[test]
fn milestone_marks_a_point_in_time() {
    let activities = vec![act("draft", 4), act("publish", 2)];
    let milestones = vec![Milestone::new("approved", "Board approval")];
    let deps = vec![Dependency::new("draft", "approved"), Dependency::new("approved", "publish")];

    let result = calculate_critical_path(&activities, &milestones, &deps).unwrap();

    let approved = result.node("approved").unwrap();
    assert_eq!((approved.earliest_start, approved.earliest_finish), (4, 4));
    assert_eq!(result.node("publish").unwrap().earliest_start, 4);
    assert_eq!(result.project_duration, 6);
}
