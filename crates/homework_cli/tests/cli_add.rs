use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("homework-{nanos}-{file_name}"))
}

fn run(store_path: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_homework");
    Command::new(exe)
        .args(args)
        .env("HOMEWORK_STORE_PATH", store_path)
        .env("HOMEWORK_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run homework binary")
}

#[test]
fn add_bootstraps_the_store_file() {
    let store_path = temp_path("cli-add.tsk");

    let output = run(
        &store_path,
        &[
            "add",
            "Essay draft",
            "--due",
            "2025-03-15",
            "--class",
            "English",
            "--priority",
            "high",
        ],
    );

    let content = std::fs::read_to_string(&store_path).expect("store file written");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Essay draft"));

    let parsed: serde_json::Value = serde_json::from_str(&content).expect("store json");
    assert_eq!(parsed["schema_version"], 1);
    let tasks = parsed["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Essay draft");
    assert_eq!(tasks[0]["due_date"], "2025-03-15T00:00:00Z");
    assert_eq!(tasks[0]["class_name"], "English");
    assert_eq!(tasks[0]["priority"], 2);
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn add_json_reports_the_new_task() {
    let store_path = temp_path("cli-add-json.tsk");

    let output = run(
        &store_path,
        &[
            "--json",
            "add",
            "Reading",
            "--due",
            "2025-03-01",
            "--class",
            "History",
            "--priority",
            "very-high",
        ],
    );

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed["index"], 0);
    assert_eq!(parsed["title"], "Reading");
    assert_eq!(parsed["priority"], "Very High");
    assert_eq!(parsed["priority_ordinal"], 3);
    assert_eq!(parsed["completed"], false);
}

#[test]
fn add_clamps_day_overflow_like_the_picker() {
    let store_path = temp_path("cli-add-clamp.tsk");

    let output = run(
        &store_path,
        &[
            "add",
            "Past paper",
            "--due",
            "2023-02-31",
            "--class",
            "Maths",
            "--priority",
            "1",
        ],
    );

    let content = std::fs::read_to_string(&store_path).expect("store file written");
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("store json");
    assert_eq!(parsed["tasks"][0]["due_date"], "2023-02-28T00:00:00Z");
}

#[test]
fn add_rejects_malformed_due_date() {
    let store_path = temp_path("cli-add-bad-date.tsk");

    let output = run(
        &store_path,
        &[
            "add",
            "Essay",
            "--due",
            "soon",
            "--class",
            "English",
            "--priority",
            "low",
        ],
    );

    assert!(!output.status.success());
    assert!(!store_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_argument"));
}

#[test]
fn add_rejects_unknown_priority() {
    let store_path = temp_path("cli-add-bad-priority.tsk");

    let output = run(
        &store_path,
        &[
            "add",
            "Essay",
            "--due",
            "2025-03-15",
            "--class",
            "English",
            "--priority",
            "urgent",
        ],
    );

    assert!(!output.status.success());
    assert!(!store_path.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_argument"));
}
