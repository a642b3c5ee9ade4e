//! Configuration management for `regexgrid-core`.
//!
//! This module defines the settings for the inference backend and the HTTP front
//! end. Both can be loaded from a YAML file; every field has a default so a
//! partial file (or none at all) is valid.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Replacement used when no value can be extracted from the instruction.
pub const DEFAULT_REPLACEMENT: &str = "REDACTED";

/// Number of rows included in each side of a JSON preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

/// Settings for the Ollama-compatible completion backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing path (e.g. `http://localhost:11434`).
    pub base_url: String,
    /// Model name passed with every chat request.
    pub model: String,
    /// Timeout for the liveness probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Timeout for the completion request, in seconds.
    pub completion_timeout_secs: u64,
    /// Output-length cap sent as `num_predict`.
    pub num_predict: u32,
    /// Sampling temperature. Zero keeps replies deterministic.
    pub temperature: f32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            probe_timeout_secs: 5,
            completion_timeout_secs: 30,
            num_predict: 200,
            temperature: 0.0,
        }
    }
}

impl BackendConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Joins `path` onto the base URL, tolerating a trailing slash on either side.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Rows per side of the transform preview.
    pub preview_rows: usize,
    /// Upper bound on a request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Top-level configuration for regexgrid.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub backend: BackendConfig,
    pub server: ServerConfig,
}

impl ServiceConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ServiceConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        debug!(
            "Loaded configuration: backend={} model={} bind={}",
            config.backend.base_url, config.backend.model, config.server.bind
        );
        Ok(config)
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.backend.base_url.trim().is_empty() {
            errors.push("`backend.base_url` must not be empty.".to_string());
        } else if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            errors.push(format!(
                "`backend.base_url` must start with http:// or https:// (got '{}').",
                self.backend.base_url
            ));
        }
        if self.backend.model.trim().is_empty() {
            errors.push("`backend.model` must not be empty.".to_string());
        }
        if self.backend.probe_timeout_secs == 0 {
            errors.push("`backend.probe_timeout_secs` must be greater than zero.".to_string());
        }
        if self.backend.completion_timeout_secs == 0 {
            errors.push("`backend.completion_timeout_secs` must be greater than zero.".to_string());
        }
        if self.backend.num_predict == 0 {
            errors.push("`backend.num_predict` must be greater than zero.".to_string());
        }
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            errors.push(format!(
                "`backend.temperature` must be between 0 and 2 (got {}).",
                self.backend.temperature
            ));
        }
        if self.server.preview_rows == 0 {
            errors.push("`server.preview_rows` must be at least 1.".to_string());
        }
        if self.server.max_upload_bytes == 0 {
            errors.push("`server.max_upload_bytes` must be greater than zero.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}
