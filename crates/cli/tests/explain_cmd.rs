//! CLI tests for the `braille explain` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn braille_cmd() -> Command {
    Command::new(cargo::cargo_bin!("braille"))
}

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = braille_cmd()
        .args(["explain", "BRL1001", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["id"], "BRL1001");
    assert_eq!(json["severity"], "error");
    assert!(json["explanation"].is_string());
}

#[test]
fn explain_warning_code_reports_warn_severity() {
    let output = braille_cmd()
        .args(["explain", "BRL2001", "--output", "json"])
        .output()
        .expect("run explain command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["severity"], "warn");
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = braille_cmd()
        .args(["explain", "BRL9999", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["id"], "BRL9999");
    assert!(json["explanation"].is_null());
    assert!(json["severity"].is_null());
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = braille_cmd()
        .args(["explain", "BRL1002", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("BRL1002") && stdout.contains(':'),
        "unexpected output: {stdout}"
    );
}
