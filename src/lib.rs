//! Side-by-side LLM comparison service
//!
//! Sends one prompt to the OpenAI chat-completions API and the Gemini
//! generateContent API concurrently, normalizes both outcomes into a common
//! result shape, and keeps a bounded history of past comparisons.

pub mod api;
pub mod core;
pub mod models;

pub use crate::core::comparator::{Comparator, ComparisonError, CredentialOverrides, Credentials};
pub use crate::core::history::HistoryStore;
pub use crate::models::comparison::{ComparisonRecord, Provider, ProviderResult, TokenUsage};
