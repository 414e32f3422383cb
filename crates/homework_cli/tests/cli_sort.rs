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

fn write_store(store_path: &PathBuf) {
    let content = serde_json::json!({
        "schema_version": 1,
        "tasks": [
            {
                "title": "c",
                "due_date": "2022-08-12T00:00:00Z",
                "class_name": "x",
                "completed": false,
                "priority": 2
            },
            {
                "title": "a",
                "due_date": "2025-07-01T00:00:00Z",
                "class_name": "z",
                "completed": false,
                "priority": 1
            },
            {
                "title": "b",
                "due_date": "2018-10-10T00:00:00Z",
                "class_name": "y",
                "completed": false,
                "priority": 0
            }
        ]
    });
    std::fs::write(store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

fn stored_titles(content: &str) -> Vec<String> {
    let parsed: serde_json::Value = serde_json::from_str(content).unwrap();
    parsed["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn sort_by_name_reorders_and_records_the_key() {
    let store_path = temp_path("cli-sort-name.tsk");
    write_store(&store_path);

    let output = run(&store_path, &["sort", "name"]);

    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sorted tasks by name"));

    assert_eq!(stored_titles(&content), vec!["a", "b", "c"]);
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["sort_key"], "name");
}

#[test]
fn sort_by_due_date_orders_chronologically() {
    let store_path = temp_path("cli-sort-due.tsk");
    write_store(&store_path);

    let output = run(&store_path, &["sort", "due"]);

    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(stored_titles(&content), vec!["b", "c", "a"]);
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["sort_key"], "due_date");
}

#[test]
fn sort_without_key_advances_through_the_cycle() {
    let store_path = temp_path("cli-sort-cycle.tsk");
    write_store(&store_path);

    let first = run(&store_path, &["sort"]);
    assert!(first.status.success());
    let content = std::fs::read_to_string(&store_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["sort_key"], "name");

    let second = run(&store_path, &["sort"]);
    assert!(second.status.success());
    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["sort_key"], "class");
    assert_eq!(stored_titles(&content), vec!["c", "b", "a"]);
}

#[test]
fn sort_rejects_unknown_key() {
    let store_path = temp_path("cli-sort-unknown.tsk");
    write_store(&store_path);

    let output = run(&store_path, &["sort", "size"]);

    let content = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_argument"));
    assert_eq!(stored_titles(&content), vec!["c", "a", "b"]);
}
