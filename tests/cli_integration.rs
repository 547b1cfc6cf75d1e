#[allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tasklist::db::SqliteStore;
use tasklist::store::{KeyValueStore, TASKS_KEY};
use tempfile::TempDir;

// ─── helpers ───────────────────────────────────────────────────────

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        Self { dir }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasklist").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env("TASKLIST_DIR", self.data_dir());
        cmd.env_remove("TASKLIST_LOG");
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut a: Vec<&str> = args.to_vec();
        a.push("--json");
        let output = self.cmd().args(&a).output().expect("run");
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("parse JSON failed: {e}\nstdout: {stdout}"))
    }

    fn run_ok(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], true, "expected success=true: {v}");
        v
    }

    fn run_err(&self, args: &[&str]) -> Value {
        let v = self.run_json(args);
        assert_eq!(v["success"], false, "expected success=false: {v}");
        v
    }

    fn add(&self, title: &str, priority: &str) -> String {
        let v = self.run_ok(&["add", title, "--priority", priority]);
        v["data"]["task"]["id"].as_str().unwrap().to_string()
    }

    fn list_titles(&self, args: &[&str]) -> Vec<String> {
        let mut a = vec!["list"];
        a.extend_from_slice(args);
        let v = self.run_ok(&a);
        v["data"]["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect()
    }
}

fn setup() -> TestEnv {
    let env = TestEnv::new();
    env.run_ok(&["init"]);
    env
}

// ─── 1. init ───────────────────────────────────────────────────────

#[test]
fn test_init() {
    let env = TestEnv::new();
    let v = env.run_ok(&["init"]);
    let path = v["data"]["path"].as_str().unwrap();
    assert!(path.ends_with("tasklist.db"));
    assert!(PathBuf::from(path).exists());
    assert!(env.data_dir().join("config.json").exists());
}

#[test]
fn test_init_idempotent() {
    let env = setup();
    env.add("keep me", "low");
    env.run_ok(&["init"]);
    assert_eq!(env.list_titles(&[]), vec!["keep me"]);
}

#[test]
fn test_init_required_before_commands() {
    let env = TestEnv::new();
    let v = env.run_err(&["list"]);
    assert_eq!(v["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn test_data_dir_flag() {
    let env = TestEnv::new();
    let other = env.dir.path().join("elsewhere");
    let other = other.to_str().unwrap();
    env.run_ok(&["init", "--data-dir", other]);
    env.run_ok(&["add", "there", "--data-dir", other]);
    let v = env.run_ok(&["list", "--data-dir", other]);
    assert_eq!(v["data"]["tasks"].as_array().unwrap().len(), 1);
    env.run_err(&["list"]);
}

// ─── 2. add / show / edit ──────────────────────────────────────────

#[test]
fn test_add_and_show() {
    let env = setup();
    let v = env.run_ok(&[
        "add", "Buy milk", "--description", "2 litres", "--category", "errand", "--priority", "low",
    ]);
    let task = &v["data"]["task"];
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["status"], "pending");
    assert_eq!(task["priority"], "low");
    assert_eq!(v["notices"][0], "Task added!");

    let id = task["id"].as_str().unwrap();
    let v = env.run_ok(&["show", &id[..12]]);
    assert_eq!(v["data"]["task"]["id"], id);
    assert_eq!(v["data"]["task"]["description"], "2 litres");
    assert_eq!(v["data"]["task"]["category"], "errand");
    assert_eq!(v["data"]["task"]["position"], 0);
}

#[test]
fn test_add_defaults_to_medium() {
    let env = setup();
    let v = env.run_ok(&["add", "plain"]);
    assert_eq!(v["data"]["task"]["priority"], "medium");
    assert_eq!(v["data"]["task"]["category"], "");
}

#[test]
fn test_add_validation() {
    let env = setup();
    let v = env.run_err(&["add", "  "]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    let v = env.run_err(&["add", "x", "--priority", "urgent"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    assert!(env.list_titles(&[]).is_empty());
}

#[test]
fn test_edit_keeps_unspecified_fields() {
    let env = setup();
    let v = env.run_ok(&["add", "Draft", "--category", "work", "--priority", "high"]);
    let id = v["data"]["task"]["id"].as_str().unwrap().to_string();
    let date = v["data"]["task"]["date"].clone();
    env.run_ok(&["toggle", &id]);

    let v = env.run_ok(&["edit", &id, "--title", "Final", "--priority", "low"]);
    let task = &v["data"]["task"];
    assert_eq!(task["title"], "Final");
    assert_eq!(task["priority"], "low");
    assert_eq!(task["category"], "work");
    assert_eq!(task["status"], "completed");
    assert_eq!(task["date"], date);
    assert_eq!(v["notices"][0], "Task updated!");
}

#[test]
fn test_task_not_found() {
    let env = setup();
    let v = env.run_err(&["show", "NOPE"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
    let v = env.run_err(&["delete", "NOPE"]);
    assert_eq!(v["error"]["code"], "TASK_NOT_FOUND");
}

#[test]
fn test_ambiguous_prefix() {
    let env = setup();
    env.add("one", "low");
    env.add("two", "low");
    let v = env.run_err(&["toggle", "0"]);
    assert_eq!(v["error"]["code"], "AMBIGUOUS_REF");
}

// ─── 3. toggle / delete ────────────────────────────────────────────

#[test]
fn test_toggle_round_trip() {
    let env = setup();
    let id = env.add("milk", "low");
    let v = env.run_ok(&["toggle", &id]);
    assert_eq!(v["data"]["task"]["status"], "completed");
    let v = env.run_ok(&["toggle", &id]);
    assert_eq!(v["data"]["task"]["status"], "pending");
    assert_eq!(v["data"]["task"]["title"], "milk");
}

#[test]
fn test_delete_removes_exactly_one() {
    let env = setup();
    env.add("a", "low");
    let b = env.add("b", "low");
    env.add("c", "low");
    let v = env.run_ok(&["delete", &b]);
    assert_eq!(v["data"]["deleted"]["title"], "b");
    assert_eq!(v["notices"][0], "Task deleted!");
    assert_eq!(env.list_titles(&[]), vec!["a", "c"]);
}

// ─── 4. list / view ────────────────────────────────────────────────

#[test]
fn test_list_sort_and_search() {
    let env = setup();
    env.add("Buy milk", "low");
    env.add("Fix bug", "high");

    assert_eq!(env.list_titles(&[]), vec!["Buy milk", "Fix bug"]);
    assert_eq!(env.list_titles(&["--sort", "priority"]), vec!["Fix bug", "Buy milk"]);
    assert_eq!(env.list_titles(&["--search", "MILK", "--status", "all"]), vec!["Buy milk"]);

    let v = env.run_ok(&["list", "--search", "milk"]);
    assert_eq!(v["data"]["tasks"][0]["position"], 0);
    assert_eq!(v["data"]["summary"]["total"], 2);
}

#[test]
fn test_list_filters() {
    let env = setup();
    let a = env.add("a", "high");
    env.add("b", "low");
    env.add("c", "high");
    env.run_ok(&["toggle", &a]);

    assert_eq!(env.list_titles(&["--status", "completed"]), vec!["a"]);
    assert_eq!(env.list_titles(&["--status", "pending", "--priority", "high"]), vec!["c"]);
    let v = env.run_err(&["list", "--status", "done"]);
    assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn test_view_settings_persist() {
    let env = setup();
    env.add("low one", "low");
    env.add("high one", "high");

    let v = env.run_ok(&["view", "--sort", "priority", "--priority", "high"]);
    assert_eq!(v["data"]["view"]["sort"], "priority");
    assert_eq!(v["data"]["view"]["priority"], "high");

    assert_eq!(env.list_titles(&[]), vec!["high one"]);
    assert_eq!(env.list_titles(&["--priority", "all"]), vec!["high one", "low one"]);
    // Overrides on `list` are not saved.
    assert_eq!(env.list_titles(&[]), vec!["high one"]);

    let v = env.run_ok(&["view", "--reset"]);
    assert_eq!(v["data"]["view"]["sort"], "date");
    assert_eq!(env.list_titles(&[]), vec!["low one", "high one"]);
}

#[test]
fn test_malformed_config_is_reported() {
    let env = setup();
    std::fs::write(env.data_dir().join("config.json"), "{oops").unwrap();
    let v = env.run_err(&["list"]);
    assert_eq!(v["error"]["code"], "CONFIG_ERROR");
}

// ─── 5. move ───────────────────────────────────────────────────────

#[test]
fn test_move_to_position_is_splice() {
    let env = setup();
    let a = env.add("A", "low");
    env.add("B", "low");
    env.add("C", "low");
    env.add("D", "low");

    let v = env.run_ok(&["move", &a, "--to", "2"]);
    assert_eq!(v["data"]["moved"]["position"], 2);
    // All tasks share a priority, so the priority sort shows manual order.
    assert_eq!(env.list_titles(&["--sort", "priority"]), vec!["B", "C", "A", "D"]);
}

#[test]
fn test_move_onto_with_filter_active() {
    let env = setup();
    let a = env.add("A", "low");
    env.add("B", "high");
    let c = env.add("C", "low");
    env.add("D", "high");
    env.run_ok(&["view", "--priority", "low"]);

    env.run_ok(&["move", &a, "--onto", &c]);
    assert_eq!(
        env.list_titles(&["--priority", "all", "--sort", "priority"]),
        vec!["B", "D", "C", "A"]
    );
    let v = env.run_ok(&["show", &a]);
    assert_eq!(v["data"]["task"]["position"], 2);
}

#[test]
fn test_move_out_of_range() {
    let env = setup();
    let a = env.add("A", "low");
    let v = env.run_err(&["move", &a, "--to", "5"]);
    assert_eq!(v["error"]["code"], "INDEX_OUT_OF_RANGE");
}

// ─── 6. text output ────────────────────────────────────────────────

#[test]
fn test_text_output() {
    let env = setup();
    env.cmd()
        .args(["add", "Water plants", "--category", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added!"))
        .stdout(predicate::str::contains("Added task: Water plants"));

    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Water plants"))
        .stdout(predicate::str::contains("#home"))
        .stdout(predicate::str::contains("Showing 1 of 1"));

    env.cmd()
        .args(["show", "NOPE"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task not found"));
}

#[test]
fn test_text_list_with_non_ascii_stored_id() {
    let env = setup();
    let raw = r#"[{"id":"aéééééé","title":"Hand edited","priority":"low","status":"pending","date":"2024-01-01T00:00:00Z"}]"#;
    SqliteStore::open(&env.data_dir())
        .unwrap()
        .set(TASKS_KEY, raw)
        .unwrap();

    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] Hand edited (aéééééé) low"));

    let v = env.run_ok(&["show", "Aé"]);
    assert_eq!(v["data"]["task"]["id"], "aéééééé");
}
