use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "ucca-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_ucca_in<I, S>(dir: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_ucca_with_log(dir, None, args)
}

fn run_ucca_with_log<I, S>(dir: &Path, rust_log: Option<&str>, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_ucca");
    let mut command = Command::new(bin);
    command.current_dir(dir).env_remove("RUST_LOG");
    if let Some(filter) = rust_log {
        command.env("RUST_LOG", filter);
    }
    command
        .args(args)
        .output()
        .expect("ucca command should execute")
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_shared_team(path: &Path) {
    let payload = serde_json::json!({
        "team": "shared",
        "controllers": [
            {"id": "C1", "kind": "human", "actions": ["X"]},
            {"id": "C2", "kind": "automated", "actions": ["Y", "X"]}
        ],
        "actions": [
            {"id": "X", "verb": "open", "object": "valve", "discrete": true},
            {"id": "Y", "verb": "start", "object": "pump", "discrete": true}
        ],
        "interchangeable": [["C1", "C2"]]
    });
    fs::write(
        path,
        serde_json::to_vec_pretty(&payload).expect("authority should serialize"),
    )
    .expect("authority should be written");
}

fn write_invalid_team(path: &Path) {
    let payload = serde_json::json!({
        "controllers": [{"id": "C1", "actions": ["Z"]}],
        "actions": [{"id": "W"}]
    });
    fs::write(
        path,
        serde_json::to_vec_pretty(&payload).expect("authority should serialize"),
    )
    .expect("authority should be written");
}

#[test]
fn validate_accepts_consistent_document() {
    let tmp = TempDirGuard::new("validate-ok");
    write_shared_team(&tmp.path().join("authority.json"));

    let output = run_ucca_in(tmp.path(), ["validate", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["valid"], true);
    assert_eq!(payload["controllerCount"], 2);
    assert_eq!(payload["actionCount"], 2);
    assert_eq!(payload["interchangeableClassCount"], 1);
    assert_eq!(
        payload["catalog"]["controllers"],
        serde_json::json!([
            {"id": "C1", "kind": "human", "actionCount": 1},
            {"id": "C2", "kind": "automated", "actionCount": 2}
        ])
    );
    assert_eq!(
        payload["catalog"]["actions"][0],
        serde_json::json!({"id": "X", "label": "open valve", "discrete": true})
    );
}

#[test]
fn validate_and_summary_list_action_labels() {
    let tmp = TempDirGuard::new("labels");
    write_shared_team(&tmp.path().join("authority.json"));

    for command in ["validate", "summary"] {
        let output = run_ucca_in(tmp.path(), [command]);
        assert_success(&output);
        let text = stdout_text(&output);
        assert!(text.contains("    - C1 (human)"), "{command}:\n{text}");
        assert!(text.contains("    - C2 (automated)"), "{command}:\n{text}");
        assert!(text.contains("    - X: open valve (discrete)"), "{command}:\n{text}");
        assert!(text.contains("    - Y: start pump (discrete)"), "{command}:\n{text}");
    }

    let output = run_ucca_in(tmp.path(), ["summary", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["catalog"]["actions"][1]["label"], "start pump");
    assert_eq!(payload["catalog"]["controllers"][1]["kind"], "automated");
}

#[test]
fn validate_reports_every_violation() {
    let tmp = TempDirGuard::new("validate-bad");
    let authority = tmp.path().join("bad.json");
    write_invalid_team(&authority);

    let output = run_ucca_in(
        tmp.path(),
        [
            "validate",
            "--authority",
            authority.to_str().unwrap(),
            "--json",
        ],
    );
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["valid"], false);
    assert_eq!(
        payload["messages"],
        serde_json::json!([
            "No action properties provided for Z, but was given in controller C1.",
            "No controller defines action W"
        ])
    );
    assert_eq!(payload["violations"][0]["kind"], "undeclared_action");
}

#[test]
fn enumerate_streams_json_lines() {
    let tmp = TempDirGuard::new("enumerate");
    write_shared_team(&tmp.path().join("authority.json"));

    let output = run_ucca_in(tmp.path(), ["enumerate", "--json", "--row", "3"]);
    assert_success(&output);
    let lines: Vec<Value> = stdout_text(&output)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect();
    assert_eq!(lines.len(), 4);
    for line in &lines {
        assert_eq!(line["type"], "2a.3-4");
        assert_eq!(line["abstractionType"], "2a");
        assert_eq!(line["uccaTypes"], "3-4");
        assert_eq!(line["otherActionsState"], "starts");
    }
}

#[test]
fn enumerate_honours_limit() {
    let tmp = TempDirGuard::new("enumerate-limit");
    write_shared_team(&tmp.path().join("authority.json"));

    let output = run_ucca_in(tmp.path(), ["enumerate", "--limit", "5"]);
    assert_success(&output);
    let text = stdout_text(&output);
    assert_eq!(text.lines().count(), 5);
    assert!(text.starts_with("[2a.1-2] X provided while {Y} provided"));
}

#[test]
fn rust_log_controls_log_level() {
    let tmp = TempDirGuard::new("rust-log");
    write_shared_team(&tmp.path().join("authority.json"));

    let quiet = run_ucca_in(tmp.path(), ["enumerate", "--limit", "1"]);
    assert_success(&quiet);
    assert!(!stderr_text(&quiet).contains("enumerate complete"));

    let info = run_ucca_with_log(tmp.path(), Some("info"), ["enumerate", "--limit", "1"]);
    assert_success(&info);
    let stderr = stderr_text(&info);
    assert!(stderr.contains("enumerate complete"), "stderr:\n{stderr}");
}

#[test]
fn enumerate_rejects_unknown_row() {
    let tmp = TempDirGuard::new("enumerate-row");
    write_shared_team(&tmp.path().join("authority.json"));

    let output = run_ucca_in(tmp.path(), ["enumerate", "--row", "7"]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown row: 7"));
}

#[test]
fn summary_reports_row_counts_and_digest() {
    let tmp = TempDirGuard::new("summary");
    write_shared_team(&tmp.path().join("authority.json"));

    let first = run_ucca_in(tmp.path(), ["summary", "--json"]);
    assert_success(&first);
    let payload = parse_json_stdout(&first);
    assert_eq!(
        payload["rowCounts"],
        serde_json::json!({"row1": 8, "row2": 9, "row3": 4, "row4": 12})
    );
    assert_eq!(payload["total"], 33);
    assert_eq!(payload["interchangeableClasses"], serde_json::json!([["C1", "C2"]]));

    let second = run_ucca_in(tmp.path(), ["summary", "--json"]);
    assert_success(&second);
    assert_eq!(payload["digest"], parse_json_stdout(&second)["digest"]);
}

#[test]
fn config_file_supplies_defaults() {
    let tmp = TempDirGuard::new("config");
    write_shared_team(&tmp.path().join("team.json"));
    fs::write(
        tmp.path().join("ucca.toml"),
        "authority = \"team.json\"\nformat = \"json\"\nrows = [\"2\"]\n",
    )
    .expect("config should be written");

    let output = run_ucca_in(tmp.path(), ["enumerate"]);
    assert_success(&output);
    let text = stdout_text(&output);
    assert_eq!(text.lines().count(), 9);
    for line in text.lines() {
        let value: Value = serde_json::from_str(line).expect("each line should be JSON");
        assert_eq!(value["type"], "2b.1-2");
    }
}

#[test]
fn missing_authority_document_fails() {
    let tmp = TempDirGuard::new("missing");
    let output = run_ucca_in(tmp.path(), ["summary"]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("authority document not found"));
}
