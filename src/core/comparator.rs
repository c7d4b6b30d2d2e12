//! Concurrent dual-provider dispatch
//!
//! Runs one prompt against both providers at the same time and assembles
//! the two settled results into a single `ComparisonRecord`. Individual
//! provider failures are already folded into each result by the clients;
//! the only error produced here is a fault in the join mechanism itself.

use crate::core::provider::ProviderClient;
use crate::models::comparison::{ComparisonRecord, Provider, ProviderResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error from the comparison mechanism, not from a provider call
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("{provider} comparison task did not settle: {message}")]
    Join {
        provider: Provider,
        message: String,
    },
}

/// Process-level API keys resolved from configuration
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: String,
    pub google_api_key: String,
}

/// Per-request key overrides carried in the request body
///
/// An absent or empty override falls back to the configured credential.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
}

impl Credentials {
    /// Resolve the effective key pair for one comparison
    fn resolve(&self, overrides: &CredentialOverrides) -> (String, String) {
        (
            pick(overrides.openai_api_key.as_deref(), &self.openai_api_key),
            pick(overrides.google_api_key.as_deref(), &self.google_api_key),
        )
    }
}

fn pick(override_key: Option<&str>, configured: &str) -> String {
    match override_key {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => configured.to_string(),
    }
}

/// Runs one prompt against both providers concurrently
pub struct Comparator {
    chatgpt: Arc<dyn ProviderClient>,
    gemini: Arc<dyn ProviderClient>,
    defaults: Credentials,
}

impl Comparator {
    pub fn new(
        chatgpt: Arc<dyn ProviderClient>,
        gemini: Arc<dyn ProviderClient>,
        defaults: Credentials,
    ) -> Self {
        Self {
            chatgpt,
            gemini,
            defaults,
        }
    }

    /// Fan the prompt out to both providers and wait for both to settle
    ///
    /// Both calls always run to completion; a failure on one side never
    /// cancels or masks the other. The returned record holds exactly one
    /// result per provider, in declaration order.
    pub async fn compare(
        &self,
        prompt: &str,
        overrides: &CredentialOverrides,
    ) -> Result<ComparisonRecord, ComparisonError> {
        let (openai_key, google_key) = self.defaults.resolve(overrides);

        debug!("Dispatching comparison ({} chars)", prompt.chars().count());

        let chatgpt = self.chatgpt.clone();
        let chatgpt_prompt = prompt.to_string();
        let chatgpt_task =
            tokio::spawn(async move { chatgpt.complete(&chatgpt_prompt, &openai_key).await });

        let gemini = self.gemini.clone();
        let gemini_prompt = prompt.to_string();
        let gemini_task =
            tokio::spawn(async move { gemini.complete(&gemini_prompt, &google_key).await });

        // Wait for both tasks before surfacing either join error, so a
        // crashed task on one side never abandons the other mid-flight.
        let (chatgpt_joined, gemini_joined) =
            futures::future::join(chatgpt_task, gemini_task).await;

        let chatgpt_result = chatgpt_joined.map_err(|e| join_error(Provider::ChatGpt, e))?;
        let gemini_result = gemini_joined.map_err(|e| join_error(Provider::Gemini, e))?;

        let record = ComparisonRecord::new(prompt, chatgpt_result, gemini_result);
        info!(
            "Comparison {} settled: chatgpt {}ms ({}), gemini {}ms ({})",
            record.id,
            record.results[0].latency_ms,
            outcome(&record.results[0]),
            record.results[1].latency_ms,
            outcome(&record.results[1]),
        );

        Ok(record)
    }
}

fn outcome(result: &ProviderResult) -> &'static str {
    if result.is_error() { "error" } else { "ok" }
}

fn join_error(provider: Provider, err: tokio::task::JoinError) -> ComparisonError {
    warn!("{} comparison task did not settle: {}", provider, err);
    ComparisonError::Join {
        provider,
        message: err.to_string(),
    }
}
