// regexgrid-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use regexgrid_core::config::ServiceConfig;

fn write_yaml(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_full_file() -> Result<()> {
    let file = write_yaml(
        r#"
backend:
  base_url: "http://ollama.internal:11434"
  model: "qwen2.5-coder"
  probe_timeout_secs: 2
  completion_timeout_secs: 60
  num_predict: 128
  temperature: 0.0
server:
  bind: "127.0.0.1:9000"
  preview_rows: 25
  max_upload_bytes: 1048576
"#,
    )?;
    let config = ServiceConfig::load_from_file(file.path())?;
    assert_eq!(config.backend.base_url, "http://ollama.internal:11434");
    assert_eq!(config.backend.model, "qwen2.5-coder");
    assert_eq!(config.backend.completion_timeout_secs, 60);
    assert_eq!(config.server.bind, "127.0.0.1:9000");
    assert_eq!(config.server.preview_rows, 25);
    Ok(())
}

#[test]
fn test_partial_file_keeps_defaults() -> Result<()> {
    let file = write_yaml("backend:\n  model: mistral\n")?;
    let config = ServiceConfig::load_from_file(file.path())?;
    let defaults = ServiceConfig::default();

    assert_eq!(config.backend.model, "mistral");
    assert_eq!(config.backend.base_url, defaults.backend.base_url);
    assert_eq!(config.backend.num_predict, 200);
    assert_eq!(config.server, defaults.server);
    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() -> Result<()> {
    let file = write_yaml("backend:\n  probe_timeout_secs: 0\nserver:\n  preview_rows: 0\n")?;
    let err = ServiceConfig::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("probe_timeout_secs"));
    assert!(message.contains("preview_rows"));
    Ok(())
}

#[test]
fn test_malformed_yaml_names_the_file() -> Result<()> {
    let file = write_yaml("backend: [unclosed\n")?;
    let err = ServiceConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    assert!(ServiceConfig::load_from_file(&missing).is_err());
}
