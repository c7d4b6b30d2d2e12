//! Comparison data model
//!
//! This module defines the common result shape both provider calls are
//! normalized into, and the record format persisted to history. Field names
//! serialize in camelCase, matching the stored history format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two fixed providers a comparison runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    ChatGpt,
    Gemini,
}

impl Provider {
    /// Both providers in declaration order
    pub const ALL: [Provider; 2] = [Provider::ChatGpt, Provider::Gemini];

    /// Identifier used in serialized records and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "chatgpt",
            Provider::Gemini => "gemini",
        }
    }

    /// Vendor name used in user-facing messages
    pub fn vendor(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "OpenAI",
            Provider::Gemini => "Google",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token accounting reported by a provider
///
/// Only the chat-completions provider reports usage; the Gemini result
/// always carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Settled outcome of one provider call
///
/// Exactly one of the two holds for a well-formed settlement: `content`
/// non-empty with no `error`, or `content` empty with `error` present. A
/// success-status response whose body lacks the text field is the documented
/// exception: it settles with empty content and no error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResult {
    pub provider: Provider,
    /// Model output; empty string on failure
    pub content: String,
    /// When the result was finalized
    pub issued_at: DateTime<Utc>,
    /// Wall-clock duration from dispatch to settlement
    pub latency_ms: u64,
    /// Present if and only if the call did not succeed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl ProviderResult {
    /// Build a success result, stamping the settlement time
    pub fn success(
        provider: Provider,
        content: String,
        latency_ms: u64,
        usage: Option<TokenUsage>,
    ) -> Self {
        Self {
            provider,
            content,
            issued_at: Utc::now(),
            latency_ms,
            error: None,
            usage,
        }
    }

    /// Build a failure result; content is empty and usage absent
    pub fn failure(provider: Provider, error: String, latency_ms: u64) -> Self {
        Self {
            provider,
            content: String::new(),
            issued_at: Utc::now(),
            latency_ms,
            error: Some(error),
            usage: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One full comparison: a prompt and both settled results
///
/// Immutable after creation. A record is created even when one or both
/// providers failed; failure lives inside the individual results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    /// Opaque unique identifier, generated at creation
    pub id: String,
    pub prompt: String,
    /// Exactly two entries, one per provider, in declaration order
    pub results: Vec<ProviderResult>,
    pub created_at: DateTime<Utc>,
}

impl ComparisonRecord {
    /// Assemble a record from both settled results
    ///
    /// Result order is provider declaration order, not completion order;
    /// consumers should look results up by `provider` field.
    pub fn new(
        prompt: impl Into<String>,
        chatgpt: ProviderResult,
        gemini: ProviderResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            results: vec![chatgpt, gemini],
            created_at: Utc::now(),
        }
    }

    /// Look up the result for one provider
    pub fn result_for(&self, provider: Provider) -> Option<&ProviderResult> {
        self.results.iter().find(|r| r.provider == provider)
    }
}
