//! CLI tests for `braille translate`, `encode`, and `decode`.

use std::process::Command;

use assert_cmd::cargo;

const HI_CELLS: &str = ".....OO.OO...OO...";

fn braille_cmd() -> Command {
    Command::new(cargo::cargo_bin!("braille"))
}

fn run_json(args: &[&str]) -> (bool, serde_json::Value) {
    let output = braille_cmd()
        .args(args)
        .args(["--output", "json"])
        .output()
        .expect("run braille command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    (output.status.success(), json)
}

#[test]
fn translate_text_encodes() {
    let (ok, json) = run_json(&["translate", "Hi"]);
    assert!(ok);
    assert_eq!(json["ok"], true);
    assert_eq!(json["kind"], "plain_text");
    assert_eq!(json["output"], HI_CELLS);
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn translate_cells_decodes() {
    let (ok, json) = run_json(&["translate", HI_CELLS]);
    assert!(ok);
    assert_eq!(json["kind"], "cell_stream");
    assert_eq!(json["output"], "Hi");
}

#[test]
fn translate_pretty_prints_bare_output() {
    let output = braille_cmd()
        .args(["translate", "Hi", "--output", "pretty"])
        .output()
        .expect("run translate command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), HI_CELLS);
}

#[test]
fn translate_empty_input_is_empty_output() {
    let (ok, json) = run_json(&["translate", ""]);
    assert!(ok);
    assert_eq!(json["kind"], "cell_stream");
    assert_eq!(json["output"], "");
}

#[test]
fn encode_unencodable_character_warns_but_succeeds() {
    let (ok, json) = run_json(&["encode", "a@b"]);
    assert!(ok);
    assert_eq!(json["output"], "O.....[?]O.O...");
    let diags = json["diagnostics"].as_array().expect("diagnostics array");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["id"], "BRL2001");
    assert_eq!(diags[0]["severity"], "warn");
    assert_eq!(diags[0]["span"]["start"], 1);
    assert_eq!(diags[0]["context"]["char"], "@");
}

#[test]
fn encode_accepts_leading_hyphen() {
    let (ok, json) = run_json(&["encode", "-1"]);
    assert!(ok);
    assert_eq!(json["output"], "..OO...O.OOOO.....");
}

#[test]
fn placeholder_flag_overrides_default() {
    let (ok, json) = run_json(&["encode", "a@", "--placeholder", "<?>"]);
    assert!(ok);
    assert_eq!(json["output"], "O.....<?>");
}

#[test]
fn placeholder_made_of_cell_symbols_is_rejected() {
    let (ok, json) = run_json(&["encode", "a@", "--placeholder", "O."]);
    assert!(!ok);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    assert!(
        json["message"]
            .as_str()
            .is_some_and(|m| m.contains("placeholder")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn decode_malformed_stream_exits_nonzero() {
    let (ok, json) = run_json(&["decode", "O.O.O"]);
    assert!(!ok);
    assert_eq!(json["ok"], false);
    assert!(json["output"].is_null());
    let diags = json["diagnostics"].as_array().expect("diagnostics array");
    assert_eq!(diags[0]["id"], "BRL1002");
    assert_eq!(diags[0]["severity"], "error");
}

#[test]
fn decode_unknown_cell_exits_nonzero() {
    let (ok, json) = run_json(&["decode", "O.....OOOOOO"]);
    assert!(!ok);
    let diags = json["diagnostics"].as_array().expect("diagnostics array");
    assert_eq!(diags[0]["id"], "BRL1001");
    assert_eq!(diags[0]["span"]["start"], 6);
    assert_eq!(diags[0]["span"]["end"], 12);
}

#[test]
fn decode_dangling_capital_is_only_a_warning() {
    let (ok, json) = run_json(&["decode", "O..........O"]);
    assert!(ok);
    assert_eq!(json["output"], "a");
    let diags = json["diagnostics"].as_array().expect("diagnostics array");
    assert!(diags.iter().any(|d| d["id"] == "BRL2002"));
}

#[test]
fn decode_pretty_renders_error_to_stderr() {
    let output = braille_cmd()
        .args(["decode", "OOOOOO", "--output", "pretty"])
        .output()
        .expect("run decode command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BRL1001"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("1 error"), "unexpected stderr: {stderr}");
}

#[test]
fn decode_trace_lists_every_cell() {
    let (ok, json) = run_json(&["decode", ".O.OOOO.....", "--trace"]);
    assert!(ok);
    assert_eq!(json["output"], "1");
    let trace = json["trace"].as_array().expect("trace array");
    assert_eq!(trace.len(), 2);
    assert_eq!(trace[0]["event"], "number_marker");
    assert_eq!(trace[0]["mode_after"], "numeric_active");
    assert_eq!(trace[1]["emitted"], "1");
}

#[test]
fn decode_without_trace_omits_trace_key() {
    let (_, json) = run_json(&["decode", HI_CELLS]);
    assert!(json.get("trace").is_none());
}

#[test]
fn repaired_table_changes_punctuation() {
    let (_, faithful) = run_json(&["encode", "."]);
    let (_, repaired) = run_json(&["encode", ".", "--table", "repaired"]);
    assert_eq!(faithful["output"], ".O.OOO");
    assert_eq!(repaired["output"], "..OO.O");
}

#[test]
fn translate_trace_on_text_warns_and_still_encodes() {
    let output = braille_cmd()
        .args(["translate", "Hi", "--trace", "--output", "json"])
        .output()
        .expect("run translate command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["output"], HI_CELLS);
    assert!(json.get("trace").is_none());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--trace only applies"), "unexpected stderr: {stderr}");
}
