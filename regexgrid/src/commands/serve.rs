// regexgrid/src/commands/serve.rs
//! `regexgrid serve`

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use regexgrid_core::{CompletionBackend, OllamaBackend, PatternSynthesizer, ServiceConfig};

use crate::server;

pub async fn run_serve(config: ServiceConfig) -> Result<()> {
    let backend = OllamaBackend::new(config.backend.clone())?;

    // Startup check only; each request probes again.
    match backend.is_available().await {
        Ok(true) => info!(
            "Ollama reachable at {} (model '{}').",
            config.backend.base_url, config.backend.model
        ),
        _ => warn!(
            "Ollama is not reachable at {}; transforms will fail until it is.",
            config.backend.base_url
        ),
    }

    let synthesizer = PatternSynthesizer::new(Arc::new(backend));
    server::serve(synthesizer, &config.server).await
}
