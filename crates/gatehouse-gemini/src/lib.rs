// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini completion provider for Gatehouse.
//!
//! This crate implements [`CompletionProvider`] over the Gemini
//! `generateContent` endpoint, used by the extraction pipeline to turn email
//! text into structured guest data.

pub mod client;
pub mod types;

use async_trait::async_trait;
use gatehouse_config::GatehouseConfig;
use gatehouse_core::{CompletionProvider, GatehouseError};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Gemini completion provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
    max_output_tokens: u32,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.gemini.api_key` if set and non-empty
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &GatehouseConfig) -> Result<Self, GatehouseError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(api_key, config.gemini.model.clone())?;

        info!(model = config.gemini.model, "Gemini provider initialized");

        Ok(Self {
            client,
            max_output_tokens: config.gemini.max_output_tokens,
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GeminiClient, max_output_tokens: u32) -> Self {
        Self {
            client,
            max_output_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, GatehouseError> {
        let request = GenerateContentRequest::from_prompt(prompt, self.max_output_tokens);
        let response = self.client.generate_content(&request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "generateContent usage"
            );
        }

        response
            .first_candidate_text()
            .ok_or_else(|| GatehouseError::Provider {
                message: "model returned no candidates".into(),
                source: None,
            })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, GatehouseError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("GEMINI_API_KEY").map_err(|_| {
        GatehouseError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )
    })
}
