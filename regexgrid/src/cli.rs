// regexgrid/src/cli.rs
//! This file defines the command-line interface (CLI) for the regexgrid application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

use regexgrid_core::ServiceConfig;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "regexgrid",
    version = env!("CARGO_PKG_VERSION"),
    about = "Natural-language find and replace for CSV and Excel files",
    long_about = "regexgrid turns an instruction such as \"find email addresses\" or \"change Tom to John\" into a regular expression (via a local Ollama model) and applies it to the columns of a CSV, XLS or XLSX file. Run it as an HTTP service with `serve`, or on a single file with `apply`.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(long = "config", value_name = "FILE", global = true, help = "Path to a YAML configuration file.")]
    pub config: Option<PathBuf>,

    /// Base URL of the Ollama server.
    #[arg(long = "ollama-host", env = "OLLAMA_HOST", value_name = "URL", global = true)]
    pub ollama_host: Option<String>,

    /// Model used for pattern synthesis.
    #[arg(long = "model", env = "OLLAMA_MODEL", value_name = "NAME", global = true)]
    pub model: Option<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `regexgrid` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Starts the HTTP service.
    #[command(about = "Start the HTTP service (POST /api/transform, POST /api/download).")]
    Serve(ServeCommand),

    /// Transforms a single local file.
    #[command(about = "Apply an instruction to a local CSV/XLS/XLSX file.")]
    Apply(ApplyCommand),
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Socket address to listen on.
    #[arg(long, env = "REGEXGRID_BIND", value_name = "ADDR", help = "Address to listen on, e.g. 0.0.0.0:8000.")]
    pub bind: Option<String>,
}

/// Arguments for the `apply` command.
#[derive(Parser, Debug)]
pub struct ApplyCommand {
    /// Path to the input table.
    #[arg(long, short = 'i', value_name = "FILE", help = "CSV, XLS or XLSX file to transform.")]
    pub input: PathBuf,

    /// What to find and replace, in plain language.
    #[arg(long, short = 'n', value_name = "TEXT", help = "Instruction, e.g. \"find email addresses\".")]
    pub instruction: String,

    /// Restrict the transform to these columns (comma-separated).
    #[arg(long, short = 'c', value_delimiter = ',', help = "Only transform these columns (comma-separated).")]
    pub columns: Vec<String>,

    /// Write the transformed table here instead of printing a preview.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the transformed table to FILE (.xlsx for Excel, CSV otherwise).")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Builds the effective configuration: file (or defaults), then flag/env overrides.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load_from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(host) = &self.ollama_host {
            config.backend.base_url = normalize_host(host);
        }
        if let Some(model) = &self.model {
            config.backend.model = model.clone();
        }
        if let Commands::Serve(ServeCommand { bind: Some(bind) }) = &self.command {
            config.server.bind = bind.clone();
        }

        config.validate()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}

/// `OLLAMA_HOST` is often given without a scheme (`localhost:11434`).
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
