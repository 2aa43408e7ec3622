//! CLI integration tests.
//!
//! These tests verify argument parsing, configuration loading and the seed
//! files the binary reads.

use std::ffi::OsString;
use std::io::Write;
use tempfile::NamedTempFile;

use scorm_runtime::app;
use scorm_runtime::cli::{parse_args_from, Args};
use scorm_runtime::config::Config;
use scorm_runtime::runtime::data_model_from_json;
use scorm_runtime::{
    review_data, AttemptRecord, CmiValue, RuntimeError, ScormApi, TerminateGuard,
};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("scorm-runtime")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.data.is_none());
    assert!(result.attempt.is_none());
    assert!(result.config.is_none());
    assert!(result.script.is_none());
    assert!(!result.dump);
    assert!(!result.json);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-d",
        "seed.json",
        "-t",
        "unbound-reference",
        "-l",
        "debug",
        "--dump",
        "calls.txt",
    ]))
    .unwrap();

    assert_eq!(result.data.unwrap().to_str().unwrap(), "seed.json");
    assert_eq!(result.terminate_guard, Some(TerminateGuard::UnboundReference));
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert!(result.dump);
    assert_eq!(result.script.unwrap().to_str().unwrap(), "calls.txt");
}

#[test]
fn test_cli_conflicting_seed_options() {
    assert!(parse_args_from(args(&["--data", "a.json", "--attempt", "b.json"])).is_err());
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_file_then_cli_override() {
    let file = temp_file(r#"{ "runtime": { "terminate_guard": "unbound-reference" } }"#);
    let path = file.path().to_str().unwrap().to_string();

    let parsed = parse_args_from(args(&["-c", &path])).unwrap();
    let mut config = Config::from_file(parsed.config.as_ref().unwrap()).unwrap();
    config.apply_args(&parsed);
    assert_eq!(
        config.runtime.terminate_guard,
        TerminateGuard::UnboundReference
    );

    let parsed = parse_args_from(args(&["-c", &path, "-t", "ignore-unbound"])).unwrap();
    let mut config = Config::from_file(parsed.config.as_ref().unwrap()).unwrap();
    config.apply_args(&parsed);
    assert_eq!(config.runtime.terminate_guard, TerminateGuard::IgnoreUnbound);
}

#[test]
fn test_config_invalid_json() {
    let file = temp_file("{ not json");
    assert!(Config::from_file(file.path()).is_err());
}

// ============================================================================
// Seed File Tests
// ============================================================================

#[test]
fn test_seed_mapping_file() {
    let file = temp_file(
        r#"{
            "cmi.core.student_id": "123",
            "cmi.core.score.raw": 42,
            "cmi.core.lesson_location": null
        }"#,
    );

    let data = data_model_from_json(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    let mut api = ScormApi::new(data);

    assert!(api.initialize(""));
    assert_eq!(
        api.get_value("cmi.core.student_id"),
        Some(&CmiValue::from("123"))
    );
    assert_eq!(
        api.get_value("cmi.core.score.raw"),
        Some(&CmiValue::Integer(42))
    );
    assert_eq!(
        api.get_value("cmi.core.lesson_location"),
        Some(&CmiValue::Null)
    );
}

#[test]
fn test_attempt_record_file() {
    let file = temp_file(
        r#"{
            "learner": {"username": "s1234", "full_name": "Sam Lee"},
            "suspend_data": {"questions": []},
            "raw_score": 2,
            "max_score": 10,
            "completion_status": "incomplete",
            "success_status": "unknown",
            "objectives": [{"id": "q0", "max_score": 10}]
        }"#,
    );

    let attempt = AttemptRecord::from_file(file.path()).unwrap();
    let cmi = review_data(&attempt).unwrap();

    assert_eq!(cmi["cmi.mode"], CmiValue::from("review"));
    assert_eq!(cmi["cmi.learner_id"], CmiValue::from("s1234"));
    assert_eq!(cmi["cmi.score.raw"], CmiValue::Number(2.0));
    assert_eq!(cmi["cmi.objectives._count"], CmiValue::Integer(1));
    assert_eq!(cmi["cmi.objectives.0.score.max"], CmiValue::Number(10.0));
    assert_eq!(
        cmi["cmi.suspend_data"],
        CmiValue::from(r#"{"questions":[]}"#)
    );
}

// ============================================================================
// Full Run Tests
// ============================================================================

fn run_with(argv: &[&str], stdin: &str) -> scorm_runtime::Result<String> {
    let parsed: Args = parse_args_from(args(argv)).unwrap();
    let mut config = Config::default();
    config.apply_args(&parsed);

    let mut out = Vec::new();
    app::run(&parsed, &config, stdin.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_run_text_transcript_from_stdin() {
    let seed = temp_file(r#"{"cmi.core.student_id": "123", "cmi.core.lesson_location": null}"#);
    let seed_path = seed.path().to_str().unwrap().to_string();

    let output = run_with(
        &["-d", &seed_path],
        "Initialize(\"\")\nGetValue(\"cmi.core.student_id\")\nGetValue(\"cmi.core.lesson_location\")\nGetValue(\"cmi.missing\")\nSetValue(\"cmi.core.lesson_status\", \"passed\")\nTerminate(\"\")\n",
    )
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"Initialize("") -> true"#,
            r#"GetValue("cmi.core.student_id") -> 123"#,
            r#"GetValue("cmi.core.lesson_location") -> null"#,
            r#"GetValue("cmi.missing") -> undefined"#,
            r#"SetValue("cmi.core.lesson_status", "passed") -> "#,
            "Terminate() -> true",
        ]
    );
}

#[test]
fn test_run_json_transcript_for_review_attempt() {
    let attempt = temp_file(
        r#"{"learner": {"username": "s1234"}, "completion_status": "complete"}"#,
    );
    let attempt_path = attempt.path().to_str().unwrap().to_string();

    let output = run_with(
        &["--attempt", &attempt_path, "--json"],
        "Initialize(\"\")\nGetValue(\"cmi.mode\")\nGetValue(\"cmi.learner_name\")\nGetValue(\"cmi.nothing\")\n",
    )
    .unwrap();

    let records: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["method"], "Initialize");
    assert_eq!(records[0]["result"], true);
    assert_eq!(records[1]["line"], 2);
    assert_eq!(records[1]["result"], "review");
    assert_eq!(records[1]["found"], true);
    assert_eq!(records[2]["result"], "");
    assert!(records[3].get("result").is_none());
    assert_eq!(records[3]["found"], false);
}

#[test]
fn test_run_dump_final_data() {
    let output = run_with(
        &["--dump"],
        "SetValue(\"z.last\", 1)\nSetValue(\"a.first\", true)\n",
    )
    .unwrap();

    let dump_start = output.find("\n{").unwrap() + 1;
    let (transcript, dump) = output.split_at(dump_start);
    assert_eq!(transcript.lines().count(), 2);

    let data: serde_json::Value = serde_json::from_str(dump).unwrap();
    assert_eq!(data["z.last"], 1);
    assert_eq!(data["a.first"], true);
    assert!(dump.find("a.first").unwrap() < dump.find("z.last").unwrap());
}

#[test]
fn test_run_script_file_with_unbound_guard() {
    let script = temp_file("Initialize(\"\")\nTerminate()\nGetLastError\n");
    let script_path = script.path().to_str().unwrap().to_string();

    let output = run_with(&["-t", "unbound-reference", &script_path], "ignored").unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![r#"Initialize("") -> true"#, "Terminate() -> false", "GetLastError() -> 0"]
    );
}

#[test]
fn test_run_missing_seed_file() {
    let result = run_with(&["-d", "/nonexistent/seed.json"], "");
    assert!(matches!(result, Err(RuntimeError::Io(_))));
}

#[test]
fn test_run_bad_script_reports_line() {
    let result = run_with(&[], "Initialize(\"\")\nGetValue(\n");
    assert!(matches!(result, Err(RuntimeError::Script { line: 2, .. })));
}
