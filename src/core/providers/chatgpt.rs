//! ChatGPT provider implementation
//!
//! Calls the OpenAI chat-completions endpoint with bearer authentication and
//! normalizes every outcome into a `ProviderResult`.

use crate::core::constants::{CHATGPT_MODEL, TEMPERATURE};
use crate::core::provider::{elapsed_ms, ProviderClient, ProviderFailure};
use crate::models::comparison::{Provider, ProviderResult, TokenUsage};
use crate::models::openai::{
    OpenAIChatCompletionRequest, OpenAIChatCompletionResponse, OpenAIMessage,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// ChatGPT provider client
pub struct ChatGptClient {
    client: Client,
    api_url: String,
}

impl ChatGptClient {
    /// Create a new ChatGPT client
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full chat-completions endpoint URL
    /// * `timeout` - Request timeout in seconds
    pub fn new(api_url: String, timeout: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_url }
    }

    /// Internal method to send the completion request
    async fn send_request(
        &self,
        prompt: &str,
        api_key: &str,
    ) -> Result<(String, Option<TokenUsage>), ProviderFailure> {
        let request = OpenAIChatCompletionRequest {
            model: CHATGPT_MODEL.to_string(),
            messages: vec![OpenAIMessage::user(prompt)],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderFailure::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::http(
                status,
                error_detail(&error_text).as_deref(),
            ));
        }

        let completion: OpenAIChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::Decode {
                message: e.to_string(),
            })?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok((completion.first_text(), usage))
    }
}

/// Extract the provider-supplied message from an error body of the shape
/// `{"error": {"message": ...}}`
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .pointer("/error/message")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl ProviderClient for ChatGptClient {
    async fn complete(&self, prompt: &str, api_key: &str) -> ProviderResult {
        let started = Instant::now();

        if api_key.is_empty() {
            let failure = ProviderFailure::missing_key(Provider::ChatGpt);
            return ProviderResult::failure(
                Provider::ChatGpt,
                failure.to_string(),
                elapsed_ms(started),
            );
        }

        debug!("Sending prompt to ChatGPT ({} chars)", prompt.len());

        match self.send_request(prompt, api_key).await {
            Ok((content, usage)) => {
                ProviderResult::success(Provider::ChatGpt, content, elapsed_ms(started), usage)
            }
            Err(failure) => {
                warn!("ChatGPT request failed: {}", failure);
                ProviderResult::failure(
                    Provider::ChatGpt,
                    failure.to_string(),
                    elapsed_ms(started),
                )
            }
        }
    }

    fn provider(&self) -> Provider {
        Provider::ChatGpt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_extracts_nested_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("Incorrect API key provided")
        );
    }

    #[test]
    fn test_error_detail_absent_or_malformed() {
        assert_eq!(error_detail("{}"), None);
        assert_eq!(error_detail(r#"{"error": {}}"#), None);
        assert_eq!(error_detail(r#"{"error": {"message": 42}}"#), None);
        assert_eq!(error_detail("upstream body was not json"), None);
        assert_eq!(error_detail(""), None);
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_any_request() {
        // Endpoint is unroutable; only the short-circuit path can produce
        // the configuration message instead of a transport error.
        let client = ChatGptClient::new("http://127.0.0.1:9/v1/chat/completions".to_string(), 1);
        let result = client.complete("Say hi", "").await;

        assert_eq!(
            result.error.as_deref(),
            Some("OpenAI API key is not configured")
        );
        assert_eq!(result.content, "");
        assert!(result.usage.is_none());
    }
}
