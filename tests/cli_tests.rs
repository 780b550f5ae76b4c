use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn groceries() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_groceries"));
    command.env_remove("GROCERIES_CATEGORIZE");
    command.env_remove("GROCERIES_MAX_NAME_LENGTH");
    command
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_quantity_command() {
    let output = groceries().args(["quantity", "1 1/2 cups"]).output().unwrap();
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"amount": "1.5", "unit": "CUP", "unknown_unit": null})
    );
}

#[test]
fn test_parse_command() {
    let output = groceries()
        .args(["parse", "2 garlic cloves, grated", "fine sea salt"])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output),
        serde_json::json!([
            {"quantity": "2", "name": "garlic cloves", "description": "grated", "optional": false},
            {"quantity": "some", "name": "fine sea salt", "description": "", "optional": false}
        ])
    );
}

#[test]
fn test_combine_command() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("occurrences.json");
    fs::write(
        &path,
        r#"[
            {"quantity": "8", "name": "garlic cloves", "recipe_id": 1},
            {"quantity": "1", "name": "garlic clove", "recipe_id": 2}
        ]"#,
    )
    .unwrap();

    let output = groceries().arg("combine").arg(&path).output().unwrap();
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "garlic cloves": {
                "quantities": [{"amount": "9", "unit": "NONE", "unknown_unit": null}],
                "category": "produce"
            }
        })
    );
}

#[test]
fn test_combine_without_categories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("occurrences.json");
    fs::write(&path, r#"[{"quantity": "2 cups", "name": "rice", "recipe_id": 1}]"#).unwrap();

    let output = groceries()
        .env("GROCERIES_CATEGORIZE", "false")
        .arg("combine")
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["rice"]["category"], serde_json::Value::Null);
}

#[test]
fn test_schedule_command() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("schedule.json");
    fs::write(
        &path,
        r#"[
            {"recipe_id": 1, "on": "2024-03-01", "count": 2,
             "ingredients": [{"quantity": "1 cup", "name": "rice"}]},
            {"recipe_id": 2, "on": "2024-03-02",
             "ingredients": [{"quantity": "2 tbsp", "name": "rice"}]},
            {"recipe_id": 3, "on": "2024-03-09",
             "ingredients": [{"quantity": "5 cups", "name": "rice"}]}
        ]"#,
    )
    .unwrap();

    let output = groceries()
        .arg("schedule")
        .arg(&path)
        .args(["--start", "2024-03-01", "--end", "2024-03-07"])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output)["rice"]["quantities"],
        serde_json::json!([{"amount": "34", "unit": "TABLESPOON", "unknown_unit": null}])
    );
}

#[test]
fn test_schedule_rejects_reversed_range() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("schedule.json");
    fs::write(&path, "[]").unwrap();

    let output = groceries()
        .arg("schedule")
        .arg(&path)
        .args(["--start", "2024-03-07", "--end", "2024-03-01"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_missing_file_fails() {
    let output = groceries()
        .args(["combine", "/nonexistent/occurrences.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}
