// regexgrid-core/src/backends/ollama.rs
//! `CompletionBackend` for an Ollama server.
//!
//! Liveness is `GET /api/tags`; completions go to `POST /api/chat` with
//! streaming disabled. Each call carries its own timeout from `BackendConfig`.
//! License: MIT OR APACHE 2.0

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::CompletionBackend;
use crate::config::BackendConfig;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Default, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: ChatReply,
}

#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    config: BackendConfig,
}

impl OllamaBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("regexgrid/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for Ollama backend")?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn is_available(&self) -> Result<bool> {
        let url = self.config.endpoint("api/tags");
        let resp = self
            .client
            .get(&url)
            .timeout(self.config.probe_timeout())
            .send()
            .await
            .with_context(|| format!("Ollama liveness probe to {} failed", url))?;

        debug!("Ollama liveness probe returned {}", resp.status());
        Ok(resp.status().is_success())
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let url = self.config.endpoint("api/chat");
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.config.temperature,
                num_predict: self.config.num_predict,
            },
        };

        let resp = self
            .client
            .post(&url)
            .timeout(self.config.completion_timeout())
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Ollama chat request to {} failed", url))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("Ollama chat request returned HTTP {}", status);
        }

        let body: ChatResponse = resp
            .json()
            .await
            .context("Ollama chat response was not valid JSON")?;
        Ok(body.message.content)
    }
}
