use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn breathe(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("breathe").unwrap();
    cmd.env("BREATHE_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("BREATHE_LOG");
    cmd
}

#[test]
fn test_patterns_lists_builtins() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .arg("patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains("box"))
        .stdout(predicate::str::contains("4-7-8-0"))
        .stdout(predicate::str::contains("sos"));
}

#[test]
fn test_patterns_json() {
    let home = TempDir::new().unwrap();
    let output = breathe(&home).args(["patterns", "-o", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 8);
}

#[test]
fn test_show_pattern() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["show", "coherence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6.0 breaths/min"));
}

#[test]
fn test_show_unknown_pattern() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["show", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No breathing pattern named 'nope'"));
}

#[test]
fn test_simulate_box_timeline() {
    let home = TempDir::new().unwrap();
    let output = breathe(&home)
        .args(["simulate", "box", "-d", "16s", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let phases: Vec<_> = value["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["phase"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(phases, ["inhale", "hold", "exhale", "hold_after", "idle"]);
    assert_eq!(value["outcome"]["completed"], true);
}

#[test]
fn test_simulate_invalid_duration() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["simulate", "box", "-d", "soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_simulate_huge_duration_rejected() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["simulate", "box", "-d", "307445734561825861"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_simulate_past_tick_cap_rejected() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["simulate", "box", "-d", "3h", "--tick", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ticks"));
}

#[test]
fn test_custom_pattern_from_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "patterns:\n  - id: square\n    label: Square\n    inhale: 3\n    hold: 3\n    exhale: 3\n    hold_after: 3\n",
    )
    .unwrap();

    breathe(&home)
        .args(["simulate", "square", "--cycles", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Square (3-3-3-3)"));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "session:\n  tick_interval_ms: 0\n",
    )
    .unwrap();

    breathe(&home)
        .arg("patterns")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("tick_interval_ms"));

    breathe(&home).args(["config", "path"]).assert().success();
}

#[test]
fn test_history_starts_empty() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions recorded yet"));
}

#[test]
fn test_report_and_clear() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["report", "-p", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Breathing Report: All Time"));

    breathe(&home).arg("clear").assert().failure();
    breathe(&home)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared (0 sessions)"));
}

#[test]
fn test_config_init_and_path() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    breathe(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.yaml").exists());
    breathe(&home).args(["config", "init"]).assert().failure();
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("breathe"));
}
