//! CLI tests for the `braille table` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn braille_cmd() -> Command {
    Command::new(cargo::cargo_bin!("braille"))
}

fn table_json(extra: &[&str]) -> serde_json::Value {
    let output = braille_cmd()
        .args(["table", "--output", "json"])
        .args(extra)
        .output()
        .expect("run table command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn faithful_table_lists_entries_and_collisions() {
    let json = table_json(&[]);
    assert_eq!(json["variant"], "faithful");

    let entries = json["entries"].as_array().expect("entries array");
    let a = entries
        .iter()
        .find(|e| e["token"]["kind"] == "letter" && e["token"]["char"] == "a")
        .expect("entry for a");
    assert_eq!(a["cell"], "O.....");
    assert_eq!(a["dots"], serde_json::json!([1]));

    let number = entries
        .iter()
        .find(|e| e["token"]["kind"] == "number")
        .expect("number marker entry");
    assert_eq!(number["cell"], ".O.OOO");

    assert_eq!(json["collisions"].as_array().map(Vec::len), Some(7));
}

#[test]
fn repaired_table_has_no_collisions() {
    let json = table_json(&["--table", "repaired"]);
    assert_eq!(json["variant"], "repaired");
    assert_eq!(json["collisions"].as_array().map(Vec::len), Some(0));
}

#[test]
fn table_pretty_reports_collisions() {
    let output = braille_cmd()
        .args(["table", "--output", "pretty"])
        .output()
        .expect("run table command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("table: faithful"), "unexpected output: {stdout}");
    assert!(stdout.contains("collisions: 7"), "unexpected output: {stdout}");
}
