//! Gemini provider implementation
//!
//! Calls the generateContent endpoint, authenticating with the API key as a
//! `key` query parameter, and normalizes every outcome into a
//! `ProviderResult`. Gemini reports no usable token accounting for this
//! request shape, so results always carry `usage: None`.

use crate::core::constants::TEMPERATURE;
use crate::core::provider::{elapsed_ms, ProviderClient, ProviderFailure};
use crate::models::comparison::{Provider, ProviderResult};
use crate::models::gemini::{GeminiRequest, GeminiResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Gemini provider client
pub struct GeminiClient {
    client: Client,
    api_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full generateContent endpoint URL, without the key
    /// * `timeout` - Request timeout in seconds
    pub fn new(api_url: String, timeout: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_url }
    }

    /// Internal method to send the generateContent request
    async fn send_request(&self, prompt: &str, api_key: &str) -> Result<String, ProviderFailure> {
        let request = GeminiRequest::single_turn(prompt, TEMPERATURE);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderFailure::Transport {
                // The request URL embeds the key; strip it from the error.
                message: e.without_url().to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            // The error message stays at the status line; Gemini error
            // bodies are not folded in.
            return Err(ProviderFailure::http(status, None));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::Decode {
                message: e.without_url().to_string(),
            })?;

        Ok(body.first_text())
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    async fn complete(&self, prompt: &str, api_key: &str) -> ProviderResult {
        let started = Instant::now();

        if api_key.is_empty() {
            let failure = ProviderFailure::missing_key(Provider::Gemini);
            return ProviderResult::failure(
                Provider::Gemini,
                failure.to_string(),
                elapsed_ms(started),
            );
        }

        debug!("Sending prompt to Gemini ({} chars)", prompt.len());

        match self.send_request(prompt, api_key).await {
            Ok(content) => {
                ProviderResult::success(Provider::Gemini, content, elapsed_ms(started), None)
            }
            Err(failure) => {
                warn!("Gemini request failed: {}", failure);
                ProviderResult::failure(
                    Provider::Gemini,
                    failure.to_string(),
                    elapsed_ms(started),
                )
            }
        }
    }

    fn provider(&self) -> Provider {
        Provider::Gemini
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_key_fails_without_any_request() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9/v1beta/models/gemini-2.0-flash:generateContent".to_string(),
            1,
        );
        let result = client.complete("Say hi", "").await;

        assert_eq!(
            result.error.as_deref(),
            Some("Google API key is not configured")
        );
        assert_eq!(result.content, "");
    }
}
