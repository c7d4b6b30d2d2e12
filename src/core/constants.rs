//! Fixed values of the comparison pipeline
//!
//! This module defines the constants shared by the provider clients, the
//! request validation layer, and the history store.

/// Model identifier sent to the chat-completions endpoint
pub const CHATGPT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature sent to both providers
pub const TEMPERATURE: f32 = 0.7;

/// Maximum prompt length in characters, enforced at the API boundary
pub const MAX_PROMPT_CHARS: usize = 500;

/// Maximum number of comparison records kept in history
pub const MAX_HISTORY_ITEMS: usize = 10;

/// Error shown for both providers when the comparison mechanism itself
/// fails, as opposed to an individual provider call failing
pub const COMPARISON_FAILED_ERROR: &str = "Failed to get response. Please try again.";
