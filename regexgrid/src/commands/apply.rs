// regexgrid/src/commands/apply.rs
//! `regexgrid apply`: runs one transform on a local file.
//!
//! The resolved pattern, replacement and columns go to stderr. The table goes to
//! `--output` when given (format from its extension), otherwise a JSON preview is
//! printed to stdout.

use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use regexgrid_core::{
    read_table_from_path, run_transform, write_table, OllamaBackend, OutputFormat,
    PatternSynthesizer, ServiceConfig, TransformPreview, TransformRequest,
};

use crate::cli::ApplyCommand;

pub async fn run_apply(cmd: &ApplyCommand, config: &ServiceConfig) -> Result<()> {
    let table = read_table_from_path(&cmd.input)?;

    let backend = OllamaBackend::new(config.backend.clone())?;
    let synthesizer = PatternSynthesizer::new(Arc::new(backend));
    let columns = (!cmd.columns.is_empty()).then(|| cmd.columns.clone());
    let request = TransformRequest::new(cmd.instruction.clone(), columns);

    let outcome = run_transform(&synthesizer, table, &request).await?;

    {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "Pattern: {}", outcome.pattern)?;
        writeln!(stderr, "Replacement: {}", outcome.replacement)?;
        writeln!(stderr, "Columns: {}", outcome.columns_applied.join(", "))?;
    }

    match &cmd.output {
        Some(path) => {
            let format = OutputFormat::from_path(path);
            let bytes = write_table(&outcome.output, format)?;
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!(
                "Wrote {} rows to {} as {}.",
                outcome.output.row_count(),
                path.display(),
                format.extension()
            );
        }
        None => {
            let preview = TransformPreview::from_outcome(&outcome, config.server.preview_rows);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &preview)
                .context("Failed to write preview")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
