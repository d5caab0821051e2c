// CLI integration tests for the demo driver.
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_api-updates");
    let mut command = Command::new(exe);
    command.env_remove("RUST_LOG");
    command
}

fn parse_json(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    // stderr may carry tracing lines ahead of the JSON error.
    let line = text
        .lines()
        .find(|line| line.starts_with('{'))
        .expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn demo_human_output_matches_driver_lines() {
    let output = cmd().arg("demo").output().expect("demo");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "hello from init: name: John, age: 0",
            "hello from foo with arg: 0",
            "bar(): 20",
            "use_some_class: f1: 5, f2: 6",
            "exposed_internal_class.get_value(): 25",
        ]
    );
}

#[test]
fn demo_json_reports_pinned_tags() {
    let output = cmd()
        .args([
            "demo",
            "--generation",
            "v_0",
            "--bar-tag",
            "inline_v_0",
            "--format",
            "json",
        ])
        .output()
        .expect("demo");
    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    assert_eq!(value["init"]["tag"], "v_0");
    assert_eq!(value["init"]["text"], "hello from init: name: John, age: 0");
    assert_eq!(value["bar"]["tag"], "inline_v_0");
    assert_eq!(value["bar"]["value"], 10);
    assert_eq!(value["internal_value"], 25);
    assert_eq!(value["generations"]["public"]["current"], "v_1");
    assert!(value["time"].as_str().is_some());
}

#[test]
fn init_generations_agree_without_age() {
    let old = cmd()
        .args(["init", "--generation", "v_0", "--name", "Ada"])
        .output()
        .expect("init v0");
    let new = cmd()
        .args(["init", "--generation", "v_1", "--name", "Ada"])
        .output()
        .expect("init v1");
    assert!(old.status.success() && new.status.success());
    assert_eq!(old.stdout, new.stdout);
}

#[test]
fn age_on_v0_is_usage_error() {
    let output = cmd()
        .args(["init", "--generation", "v_0", "--age", "3"])
        .output()
        .expect("init");
    assert_eq!(output.status.code(), Some(2));
    let value = parse_json(&output.stderr);
    assert_eq!(value["error"]["kind"], "Usage");
    assert!(value["error"]["hint"].as_str().is_some());
}

#[test]
fn internal_rejects_negative_value() {
    let output = cmd()
        .args(["internal", "--value", "-1"])
        .output()
        .expect("internal");
    assert_eq!(output.status.code(), Some(3));
    let value = parse_json(&output.stderr);
    assert_eq!(value["error"]["kind"], "OutOfRange");
}

#[test]
fn unknown_tag_is_usage_error() {
    let output = cmd()
        .args(["bar", "--tag", "inline_v_9"])
        .output()
        .expect("bar");
    assert_eq!(output.status.code(), Some(2));
    let value = parse_json(&output.stderr);
    assert_eq!(value["error"]["kind"], "Usage");
}

#[test]
fn generations_lists_every_tag() {
    let output = cmd().arg("generations").output().expect("generations");
    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    assert_eq!(value["public"]["tags"], serde_json::json!(["v_0", "v_1"]));
    assert_eq!(
        value["inline"]["tags"],
        serde_json::json!(["inline_v_0", "inline_v_1"])
    );
}
