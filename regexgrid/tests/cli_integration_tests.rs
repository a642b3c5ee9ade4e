// regexgrid/tests/cli_integration_tests.rs
//! Command-line integration tests for the `regexgrid` binary.
//!
//! The `apply` command is run against a mockito server standing in for Ollama, so
//! no model is needed. `tempfile` keeps inputs and outputs isolated.

use anyhow::Result;
use assert_cmd::Command;
use mockito::{Server, ServerGuard};
#[allow(unused_imports)] // Used by `predicate::str::contains`
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;
use test_log::test;

use regexgrid_core::read_table;

const PEOPLE_CSV: &str = "ID,Name,Email\n1,John,john.doe@example.com\n2,Jane,jane@site.org\n";

fn mock_ollama(reply: &str) -> ServerGuard {
    let mut server = Server::new();
    server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[]}"#)
        .create();
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": {"role": "assistant", "content": reply}}).to_string())
        .create();
    server
}

fn regexgrid(ollama_url: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("regexgrid"));
    cmd.env("OLLAMA_HOST", ollama_url);
    cmd.env_remove("OLLAMA_MODEL");
    cmd.env("RUST_LOG", "debug");
    cmd
}

#[test]
fn test_apply_prints_preview_json() -> Result<()> {
    let server = mock_ollama("`[\\w.]+@[\\w.]+\\.\\w+`");
    let dir = tempdir()?;
    let input = dir.path().join("people.csv");
    fs::write(&input, PEOPLE_CSV)?;

    let output = regexgrid(&server.url())
        .args(["apply", "--input"])
        .arg(&input)
        .args(["--instruction", "find email addresses"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Replacement: REDACTED"))
        .get_output()
        .stdout
        .clone();

    let preview: Value = serde_json::from_slice(&output)?;
    assert_eq!(preview["regexUsed"], r"[\w.]+@[\w.]+\.\w+");
    assert_eq!(preview["totalRows"], 2);
    assert_eq!(preview["rows"][0]["Email"], "REDACTED");
    assert_eq!(preview["rows"][1]["ID"], 2);
    Ok(())
}

#[test]
fn test_apply_writes_xlsx_output() -> Result<()> {
    let server = mock_ollama("\\bJohn\\b");
    let dir = tempdir()?;
    let input = dir.path().join("people.csv");
    let output = dir.path().join("out.xlsx");
    fs::write(&input, PEOPLE_CSV)?;

    regexgrid(&server.url())
        .args(["--quiet", "apply", "--input"])
        .arg(&input)
        .args(["--instruction", "replace with Jack", "--columns", "Name", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let table = read_table(&fs::read(&output)?, "out.xlsx").unwrap();
    assert_eq!(table.cell(0, "Name").and_then(|c| c.as_text()), Some("Jack"));
    assert_eq!(table.cell(1, "Name").and_then(|c| c.as_text()), Some("Jane"));
    Ok(())
}

#[test]
fn test_apply_fails_when_ollama_is_down() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("people.csv");
    fs::write(&input, PEOPLE_CSV)?;

    regexgrid("http://127.0.0.1:9")
        .args(["apply", "--input"])
        .arg(&input)
        .args(["--instruction", "find email addresses"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "LLM processing failed. Please ensure Ollama is running.",
        ));
    Ok(())
}

#[test]
fn test_apply_rejects_unknown_extension() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("people.txt");
    fs::write(&input, PEOPLE_CSV)?;

    regexgrid("http://127.0.0.1:9")
        .args(["apply", "--input"])
        .arg(&input)
        .args(["--instruction", "find email addresses"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only CSV, XLS, XLSX are supported"));
    Ok(())
}

#[test]
fn test_invalid_config_file_is_reported() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("regexgrid.yaml");
    fs::write(&config, "server:\n  preview_rows: 0\n")?;

    regexgrid("http://127.0.0.1:9")
        .arg("--config")
        .arg(&config)
        .args(["apply", "--input", "x.csv", "--instruction", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preview_rows"));
    Ok(())
}

#[test]
fn test_no_arguments_prints_help() {
    Command::new(assert_cmd::cargo_bin!("regexgrid"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
