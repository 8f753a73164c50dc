//! Remote idea-generation client.
//!
//! Thin wrapper over the hosted generation API. The recommendation core
//! never calls this; it backs the `generate` CLI surface only. Network
//! failures and non-success statuses surface as `Error::Api`.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerateConfig;
use crate::core::{Error, Result};

/// A generated project idea returned by the remote API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedIdea {
    pub title: String,
    pub description: String,
    pub domain: String,
    pub skills_required: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    n: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    ideas: Vec<GeneratedIdea>,
}

/// Blocking client for the generation endpoint.
#[derive(Debug)]
pub struct GenerateClient {
    endpoint: String,
    api_key: String,
    count: usize,
    client: reqwest::blocking::Client,
}

impl GenerateClient {
    /// Build a client from config.
    ///
    /// The key comes from `[generate] api_key` or the MUSE_API_KEY
    /// environment variable; without one this fails up front rather than
    /// on first request.
    pub fn new(config: &GenerateConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| env::var("MUSE_API_KEY").ok())
            .ok_or_else(|| {
                Error::config(
                    "generation API key not set. Set MUSE_API_KEY or [generate] api_key in muse.toml.",
                )
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            count: config.count,
            client,
        })
    }

    /// Request fresh project ideas for the prompt. `n` defaults to the
    /// configured count.
    pub fn generate(&self, prompt: &str, n: Option<usize>) -> Result<Vec<GeneratedIdea>> {
        let request = GenerateRequest {
            prompt,
            n: n.unwrap_or(self.count),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| Error::api(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::api(format!("{status}: {body}")));
        }

        let response: GenerateResponse = response
            .json()
            .map_err(|e| Error::api(format!("unparseable response: {e}")))?;

        debug!(count = response.ideas.len(), "generated ideas");
        Ok(response.ideas)
    }
}
