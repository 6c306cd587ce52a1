use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_rejects_dependency_that_closes_a_cycle() {
    run_cli(
        "activity a 2025-01-06 2025-01-11 Intake\n\
         activity b 2025-01-06 2025-01-09 Review\n\
         dep a b\n\
         dep b a\n\
         compute\n\
         quit\n",
    )
    .success()
    .stdout(str_contains("Dependency a -> b added."))
    .stdout(str_contains(
        "Error: dependency b -> a would create a circular dependency",
    ))
    .stdout(str_contains("Refreshed (nodes=2, critical=2, duration=8d"));
}

#[test]
fn cli_check_command_reports_cycles_without_editing() {
    run_cli(
        "activity a - - First\n\
         activity b - - Second\n\
         dep a b\n\
         check b a\n\
         check a b\n\
         quit\n",
    )
    .success()
    .stdout(str_contains("b -> a would create a cycle."))
    .stdout(str_contains("a -> b is safe."));
}

#[test]
fn cli_accepts_relation_type_and_lag() {
    run_cli(
        "activity a 2025-01-06 2025-01-10\n\
         activity b 2025-01-06 2025-01-08\n\
         dep a b ss 2\n\
         meta start 2025-01-06\n\
         compute\n\
         quit\n",
    )
    .success()
    .stdout(str_contains("duration=4d, finish=2025-01-10"));
}

#[test]
fn cli_delete_command_removes_node() {
    run_cli("milestone gate Go/no-go\ndelete gate\ndelete gate\nquit\n")
        .success()
        .stdout(str_contains("Deleted node gate."))
        .stdout(str_contains("Node gate not found."));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "activity keep - - KeptActivity\nsave json {}\nactivity temp - - Temporary\nload json {}\nshow\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Project loaded from"));
    let after_reload = output
        .split("Project loaded from")
        .last()
        .unwrap_or_default();
    assert!(after_reload.contains("KeptActivity"));
    assert!(
        !after_reload.contains("Temporary"),
        "temporary activity should not appear after reload:\n{}",
        after_reload
    );
}

#[test]
fn cli_exports_csv_after_computing() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!(
        "activity a 2025-01-06 2025-01-09\nexport csv {}\nquit\n",
        path
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Schedule exported to"));
    let written = std::fs::read_to_string(tmp.path()).unwrap();
    assert!(written.starts_with("id,title,kind,duration"));
    assert!(written.contains("a,,activity,3"));
}
