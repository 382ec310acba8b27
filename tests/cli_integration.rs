//! CLI integration tests for reorder
//!
//! These tests drive the binary end to end: project setup, seeding,
//! moves, locks, resets and scripted replays against `.reorder/store.json`.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the reorder binary
fn reorder_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("reorder"))
}

/// Create a temporary directory and initialize a reorder project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    reorder_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Seed a collection and return the generated IDs in order
fn seed(dir: &TempDir, collection: &str, names: &[&str]) -> Vec<String> {
    let output = reorder_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "seed", collection])
        .args(names)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

/// Read a collection as (id, order) pairs
fn list(dir: &TempDir, collection: &str) -> Vec<(String, u64)> {
    let output = reorder_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "list", collection])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json.as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["id"].as_str().unwrap().to_string(),
                item["order"].as_u64().unwrap(),
            )
        })
        .collect()
}

fn ids(listing: &[(String, u64)]) -> Vec<&str> {
    listing.iter().map(|(id, _)| id.as_str()).collect()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    reorder_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized reorder project"));

    assert!(dir.path().join(".reorder").is_dir());
    assert!(dir.path().join(".reorder/config.toml").is_file());
    assert!(dir.path().join(".reorder/.gitignore").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    reorder_cmd().arg("init").arg(dir.path()).assert().success();
    reorder_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_commands_require_project() {
    let dir = TempDir::new().unwrap();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["list", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a reorder project"));
}

// =============================================================================
// Seed and List Tests
// =============================================================================

#[test]
fn test_seed_creates_normalized_collection() {
    let dir = setup_project();
    let seeded = seed(&dir, "widgets", &["Daily Inspiration", "Recent Project", "Quick Tasks"]);

    assert_eq!(seeded.len(), 3);
    assert!(seeded.iter().all(|id| id.starts_with("i-")));

    let listing = list(&dir, "widgets");
    assert_eq!(ids(&listing), seeded.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(listing.iter().map(|(_, o)| *o).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn test_seed_duplicate_names_get_distinct_ids() {
    let dir = setup_project();
    let seeded = seed(&dir, "chapters", &["Draft", "Draft"]);

    assert_ne!(seeded[0], seeded[1]);
}

#[test]
fn test_seed_refuses_to_overwrite() {
    let dir = setup_project();
    seed(&dir, "widgets", &["One"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["seed", "widgets", "Two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    reorder_cmd()
        .current_dir(dir.path())
        .args(["seed", "widgets", "Two", "--force"])
        .assert()
        .success();
}

#[test]
fn test_seed_rejects_bad_collection_name() {
    let dir = setup_project();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["seed", "bad name", "One"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid collection name"));
}

#[test]
fn test_list_text_output() {
    let dir = setup_project();
    seed(&dir, "widgets", &["Daily Inspiration"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["list", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ORDER"))
        .stdout(predicate::str::contains("Daily Inspiration"));
}

#[test]
fn test_list_unknown_collection_is_empty() {
    let dir = setup_project();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["list", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(empty)"));
}

// =============================================================================
// Move Tests
// =============================================================================

#[test]
fn test_move_forward_takes_target_slot() {
    let dir = setup_project();
    let s = seed(&dir, "letters", &["A", "B", "C", "D"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "letters", &s[0], &s[2]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved"));

    let listing = list(&dir, "letters");
    assert_eq!(ids(&listing), vec![s[1].as_str(), s[2].as_str(), s[0].as_str(), s[3].as_str()]);
    assert_eq!(listing.iter().map(|(_, o)| *o).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

#[test]
fn test_move_backward_takes_target_slot() {
    let dir = setup_project();
    let s = seed(&dir, "letters", &["A", "B", "C", "D"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "letters", &s[3], &s[1]])
        .assert()
        .success();

    let listing = list(&dir, "letters");
    assert_eq!(ids(&listing), vec![s[0].as_str(), s[3].as_str(), s[1].as_str(), s[2].as_str()]);
}

#[test]
fn test_move_onto_missing_item_is_noop() {
    let dir = setup_project();
    let s = seed(&dir, "letters", &["A", "B"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "letters", &s[0], "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change: drop target not found"));

    let listing = list(&dir, "letters");
    assert_eq!(ids(&listing), vec![s[0].as_str(), s[1].as_str()]);
}

#[test]
fn test_move_json_reports_reason() {
    let dir = setup_project();
    let s = seed(&dir, "letters", &["A", "B"]);

    let output = reorder_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "move", "letters", &s[0], &s[0]])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["moved"], false);
    assert_eq!(json["reason"], "dropped_on_self");
}

#[test]
fn test_move_dry_run_does_not_save() {
    let dir = setup_project();
    let s = seed(&dir, "letters", &["A", "B", "C"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "letters", &s[2], &s[0], "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would move"));

    let listing = list(&dir, "letters");
    assert_eq!(ids(&listing), s.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_move_rejects_empty_id() {
    let dir = setup_project();
    let s = seed(&dir, "letters", &["A"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "letters", "", &s[0]])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid item id"));
}

// =============================================================================
// Lock and Reset Tests
// =============================================================================

#[test]
fn test_locked_item_stays_put() {
    let dir = setup_project();
    let s = seed(&dir, "categories", &["Overview", "Geography", "History"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["lock", "categories", &s[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Locked"));

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "categories", &s[2], &s[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change: item is locked"));

    reorder_cmd()
        .current_dir(dir.path())
        .args(["unlock", "categories", &s[0]])
        .assert()
        .success();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "categories", &s[2], &s[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved"));

    let listing = list(&dir, "categories");
    assert_eq!(ids(&listing)[0], s[2]);
}

#[test]
fn test_lock_unknown_item_fails() {
    let dir = setup_project();
    seed(&dir, "categories", &["Overview"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["lock", "categories", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_reset_restores_seed_order() {
    let dir = setup_project();
    let s = seed(&dir, "widgets", &["A", "B", "C"]);

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "widgets", &s[2], &s[0]])
        .assert()
        .success();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["reset", "widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default order"));

    let listing = list(&dir, "widgets");
    assert_eq!(ids(&listing), s.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_reset_without_defaults_fails() {
    let dir = setup_project();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["reset", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No defaults recorded"));
}

// =============================================================================
// Replay Tests
// =============================================================================

#[test]
fn test_replay_script() {
    let dir = setup_project();
    let s = seed(&dir, "widgets", &["w1", "w2", "w3"]);

    let script = format!(
        "# drag w3 onto w1\n\
         {{\"event\":\"drag_start\",\"id\":\"{w3}\"}}\n\
         {{\"event\":\"drag_over\",\"id\":\"{w2}\"}}\n\
         {{\"event\":\"drag_leave\"}}\n\
         {{\"event\":\"drag_over\",\"id\":\"{w1}\"}}\n\
         {{\"event\":\"drop\",\"target\":\"{w1}\"}}\n\
         \n\
         {{\"event\":\"drop\",\"target\":\"{w2}\"}}\n",
        w1 = s[0],
        w2 = s[1],
        w3 = s[2]
    );
    let script_path = dir.path().join("gesture.jsonl");
    fs::write(&script_path, script).unwrap();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["replay", "widgets"])
        .arg(&script_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replayed 6 event(s), 1 reorder(s)"));

    let listing = list(&dir, "widgets");
    assert_eq!(ids(&listing), vec![s[2].as_str(), s[0].as_str(), s[1].as_str()]);
}

#[test]
fn test_replay_reports_bad_line() {
    let dir = setup_project();
    seed(&dir, "widgets", &["w1"]);

    let script_path = dir.path().join("bad.jsonl");
    fs::write(&script_path, "{\"event\":\"drag_end\"}\n{\"event\":\"teleport\"}\n").unwrap();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["replay", "widgets"])
        .arg(&script_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

// =============================================================================
// Status and Failure Tests
// =============================================================================

#[test]
fn test_status_lists_collections() {
    let dir = setup_project();
    seed(&dir, "widgets", &["A", "B"]);
    seed(&dir, "chapters", &["One"]);

    let output = reorder_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["collection"], "chapters");
    assert_eq!(rows[0]["items"], 1);
    assert_eq!(rows[1]["collection"], "widgets");
    assert_eq!(rows[1]["items"], 2);
}

#[test]
fn test_quota_failure_is_reported() {
    let dir = setup_project();
    let s = seed(&dir, "widgets", &["A", "B"]);

    fs::write(dir.path().join(".reorder/config.toml"), "quota_bytes = 32\n").unwrap();

    reorder_cmd()
        .current_dir(dir.path())
        .args(["move", "widgets", &s[1], &s[0]])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));

    // The failed write leaves the previous order in place
    let listing = list(&dir, "widgets");
    assert_eq!(ids(&listing), vec![s[0].as_str(), s[1].as_str()]);
}
