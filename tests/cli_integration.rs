//! CLI integration tests for crease
//!
//! These tests drive the binary through whole passages of play, checking
//! that state carries across invocations and that errors leave the match
//! untouched.

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the crease binary
fn crease_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("crease"));
    cmd.env_remove("CREASE_LOG");
    cmd
}

/// Create a temporary directory and set up a short match in it
fn setup_match(extra: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    crease_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--overs", "2", "--team-a", "Hawks", "--team-b", "Owls"])
        .args(extra)
        .assert()
        .success();
    dir
}

/// Run a command inside the match directory and expect success
fn play(dir: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    crease_cmd().current_dir(dir.path()).args(args).assert().success()
}

fn started_match() -> TempDir {
    let dir = setup_match(&[]);
    play(&dir, &["start", "Rohit", "Gill", "Starc"]);
    dir
}

fn status_json(dir: &TempDir) -> serde_json::Value {
    let output = crease_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    crease_cmd()
        .arg("init")
        .arg(dir.path())
        .args(["--team-a", "Hawks", "--team-b", "Owls", "--overs", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hawks v Owls, 5 overs"));

    assert!(dir.path().join(".crease").is_dir());
    assert!(dir.path().join(".crease/config.toml").is_file());
    assert!(dir.path().join(".crease/snapshots.jsonl").is_file());

    let config = std::fs::read_to_string(dir.path().join(".crease/config.toml")).unwrap();
    assert!(config.contains("[rules]"));
    assert!(config.contains("overs = 5"));
}

#[test]
fn test_init_twice_fails() {
    let dir = setup_match(&[]);

    crease_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_outside_match_fail() {
    let dir = TempDir::new().unwrap();

    crease_cmd()
        .current_dir(dir.path())
        .args(["run", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a crease match"));
}

#[test]
fn test_status_before_start() {
    let dir = setup_match(&[]);

    play(&dir, &["status"]).stdout(predicate::str::contains("crease start"));
}

// =============================================================================
// Deliveries
// =============================================================================

#[test]
fn test_runs_accumulate_across_invocations() {
    let dir = started_match();

    play(&dir, &["run", "4"]).stdout(predicate::str::contains("Hawks 4/0 (0.1 ov)"));
    play(&dir, &["run", "1"]);
    play(&dir, &["wide"]).stdout(predicate::str::contains("1wd"));

    let status = status_json(&dir);
    assert_eq!(status["state"]["score"], 6);
    assert_eq!(status["overs"], "0.2");
    assert_eq!(status["striker"]["name"], "Gill");
}

#[test]
fn test_invalid_runs_rejected() {
    let dir = started_match();

    crease_cmd()
        .current_dir(dir.path())
        .args(["run", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid run count"));

    assert_eq!(status_json(&dir)["state"]["score"], 0);
}

#[test]
fn test_disabled_wides_record_nothing() {
    let dir = setup_match(&["--no-wides"]);
    play(&dir, &["start", "Rohit", "Gill", "Starc"]);

    play(&dir, &["wide"]).stderr(predicate::str::contains("switched off"));

    assert_eq!(status_json(&dir)["state"]["score"], 0);
}

#[test]
fn test_over_end_requires_new_bowler() {
    let dir = started_match();
    for _ in 0..5 {
        play(&dir, &["run", "0"]);
    }
    play(&dir, &["run", "0"]).stdout(predicate::str::contains("Next bowler"));

    crease_cmd()
        .current_dir(dir.path())
        .args(["run", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("next bowler"));

    crease_cmd()
        .current_dir(dir.path())
        .args(["bowler", "Starc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("consecutive overs"));

    play(&dir, &["bowler", "Cummins"]);
    play(&dir, &["run", "1"]);
}

// =============================================================================
// Wickets
// =============================================================================

#[test]
fn test_wicket_flow_across_invocations() {
    let dir = started_match();

    play(&dir, &["wicket", "caught"]).stdout(predicate::str::contains("Fielder?"));
    play(&dir, &["wicket", "status"]).stdout(predicate::str::contains("waiting for fielder"));

    crease_cmd()
        .current_dir(dir.path())
        .args(["run", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wicket is being recorded"));

    crease_cmd()
        .current_dir(dir.path())
        .args(["wicket", "fielder"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fielder's name"));

    play(&dir, &["wicket", "fielder", "Smith"])
        .stdout(predicate::str::contains("New batsman needed"));
    assert!(!dir.path().join(".crease/wicket.json").exists());

    play(&dir, &["batsman", "Kohli"]);
    play(&dir, &["scorecard"]).stdout(predicate::str::contains("c Smith b Starc"));
}

#[test]
fn test_run_out_flow() {
    let dir = started_match();

    play(&dir, &["wicket", "run-out"]).stdout(predicate::str::contains("Runs completed?"));
    play(&dir, &["wicket", "runs", "1", "--end", "non-striker"]);
    play(&dir, &["wicket", "fielder", "Jadeja"]);

    let status = status_json(&dir);
    assert_eq!(status["state"]["score"], 1);
    assert_eq!(status["state"]["wickets"], 1);
    assert_eq!(status["awaiting_batsman"], "striker");
}

#[test]
fn test_wicket_cancel_leaves_no_trace() {
    let dir = started_match();
    play(&dir, &["run", "2"]);

    play(&dir, &["wicket", "stumped"]);
    play(&dir, &["wicket", "cancel"]);

    let status = status_json(&dir);
    assert_eq!(status["state"]["wickets"], 0);
    assert_eq!(status["wicket_entry"]["step"], "idle");
    play(&dir, &["run", "1"]);
}

#[test]
fn test_free_hit_wicket_is_not_out() {
    let dir = started_match();
    play(&dir, &["no-ball"]).stdout(predicate::str::contains("Free hit"));

    play(&dir, &["wicket", "bowled"]).stdout(predicate::str::contains("FH"));

    let status = status_json(&dir);
    assert_eq!(status["state"]["wickets"], 0);
    assert_eq!(status["state"]["is_free_hit"], false);
}

// =============================================================================
// Corrections
// =============================================================================

#[test]
fn test_undo_reverts_last_event() {
    let dir = started_match();
    play(&dir, &["run", "4"]);
    play(&dir, &["run", "6"]);

    play(&dir, &["undo"]).stdout(predicate::str::contains("Undid: run 6"));

    assert_eq!(status_json(&dir)["state"]["score"], 4);
}

#[test]
fn test_undo_on_fresh_match_fails() {
    let dir = setup_match(&[]);

    crease_cmd()
        .current_dir(dir.path())
        .arg("undo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to undo"));
}

#[test]
fn test_rename_by_id() {
    let dir = started_match();
    let status = status_json(&dir);
    let id = status["striker"]["id"].as_str().unwrap().to_string();

    play(&dir, &["rename", &id, "Rohit Sharma"]);

    assert_eq!(status_json(&dir)["striker"]["name"], "Rohit Sharma");
}

#[test]
fn test_retire_and_return() {
    let dir = started_match();
    play(&dir, &["run", "2"]);

    play(&dir, &["retire", "striker", "Pant"]).stdout(predicate::str::contains("retired hurt"));
    play(&dir, &["scorecard"]).stdout(predicate::str::contains("retired hurt"));

    play(&dir, &["return", "Rohit", "striker"]);
    let status = status_json(&dir);
    assert_eq!(status["striker"]["name"], "Rohit");
    assert_eq!(status["striker"]["runs"], 2);
}

#[test]
fn test_revise_overs_ends_innings() {
    let dir = started_match();
    for _ in 0..6 {
        play(&dir, &["run", "1"]);
    }
    play(&dir, &["bowler", "Cummins"]);

    play(&dir, &["revise", "overs", "1"]).stdout(predicate::str::contains("Target: 7"));
}

#[test]
fn test_abandon_is_final() {
    let dir = started_match();
    play(&dir, &["run", "4"]);

    play(&dir, &["abandon"]).stdout(predicate::str::contains("No result"));

    crease_cmd()
        .current_dir(dir.path())
        .args(["run", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("match is over"));
}

// =============================================================================
// Whole match
// =============================================================================

#[test]
fn test_one_over_match_chase() {
    let dir = setup_match(&["--overs", "1"]);
    play(&dir, &["start", "Rohit", "Gill", "Starc"]);
    for runs in ["4", "0", "0", "2", "0", "0"] {
        play(&dir, &["run", runs]);
    }
    play(&dir, &["status"]).stdout(predicate::str::contains("Target: 7"));

    play(&dir, &["start", "Warner", "Head", "Bumrah"])
        .stdout(predicate::str::contains("Owls batting"));
    play(&dir, &["run", "6"]);
    play(&dir, &["run", "1"]).stdout(predicate::str::contains("Owls won"));

    play(&dir, &["scorecard", "--innings", "1"]).stdout(predicate::str::contains("Hawks 6/0"));
    play(&dir, &["history", "--innings", "2"]).stdout(predicate::str::contains("6 1"));
    play(&dir, &["partnerships"])
        .stdout(predicate::str::contains("unbroken"))
        .stdout(predicate::str::contains("Best: 7 (2 balls) Warner 7, Head 0"));
}

#[test]
fn test_scorecard_json_format() {
    let dir = started_match();
    play(&dir, &["run", "4"]);

    let output = crease_cmd()
        .current_dir(dir.path())
        .args(["scorecard", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["score"], 4);
    assert_eq!(json["batting"][0]["name"], "Rohit");
    assert_eq!(json["batting"][0]["fours"], 1);
}
