//! Provider abstraction layer for the two LLM APIs
//!
//! This module defines the common calling contract both clients implement
//! and the failure taxonomy they normalize their heterogeneous error shapes
//! into. Failures never escape a client: `complete` folds them into the
//! `error` field of the returned result.

use crate::models::comparison::{Provider, ProviderResult};
use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;

/// Failure modes of a single provider call
#[derive(Debug, Error)]
pub enum ProviderFailure {
    /// No API key was available at call time; no request was attempted
    #[error("{vendor} API key is not configured")]
    MissingKey { vendor: &'static str },

    /// Network-level failure: connect, DNS, or timeout
    #[error("{message}")]
    Transport { message: String },

    /// Non-success HTTP status from the provider
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Success status but a body that could not be decoded as JSON
    #[error("Failed to parse response: {message}")]
    Decode { message: String },
}

impl ProviderFailure {
    pub fn missing_key(provider: Provider) -> Self {
        ProviderFailure::MissingKey {
            vendor: provider.vendor(),
        }
    }

    /// Build the `Error <status>: <reason>` message for a non-success
    /// status, appending provider-supplied detail when given
    pub fn http(status: reqwest::StatusCode, detail: Option<&str>) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown");
        let mut message = format!("Error {}: {}", status.as_u16(), reason);
        if let Some(detail) = detail {
            if !detail.is_empty() {
                message.push_str(" - ");
                message.push_str(detail);
            }
        }
        ProviderFailure::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// Calling contract for one LLM provider
///
/// `complete` is infallible by design: every failure mode settles into the
/// returned result's `error` field, so the caller can join both providers
/// without error handling of its own.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Run one prompt to settlement, measuring wall-clock latency
    async fn complete(&self, prompt: &str, api_key: &str) -> ProviderResult;

    /// Which of the two fixed providers this client calls
    fn provider(&self) -> Provider;
}

/// Milliseconds elapsed since `started`, for result latency stamps
pub fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_vendor() {
        assert_eq!(
            ProviderFailure::missing_key(Provider::ChatGpt).to_string(),
            "OpenAI API key is not configured"
        );
        assert_eq!(
            ProviderFailure::missing_key(Provider::Gemini).to_string(),
            "Google API key is not configured"
        );
    }

    #[test]
    fn test_http_message_uses_canonical_reason() {
        let failure = ProviderFailure::http(reqwest::StatusCode::UNAUTHORIZED, None);
        assert_eq!(failure.to_string(), "Error 401: Unauthorized");
    }

    #[test]
    fn test_http_message_appends_detail() {
        let failure = ProviderFailure::http(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            Some("Rate limit reached for requests"),
        );
        assert_eq!(
            failure.to_string(),
            "Error 429: Too Many Requests - Rate limit reached for requests"
        );
    }

    #[test]
    fn test_http_message_ignores_empty_detail() {
        let failure = ProviderFailure::http(reqwest::StatusCode::BAD_GATEWAY, Some(""));
        assert_eq!(failure.to_string(), "Error 502: Bad Gateway");
    }

    #[test]
    fn test_decode_message_prefix() {
        let failure = ProviderFailure::Decode {
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(
            failure
                .to_string()
                .starts_with("Failed to parse response: ")
        );
    }
}
