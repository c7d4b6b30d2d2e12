//! Gemini API data models
//!
//! Request and response structures for the generateContent endpoint.
//! The response side mirrors the lenient treatment in the OpenAI models: a
//! success body missing any level of the candidates/content/parts chain
//! yields empty text rather than a decode error.

use serde::{Deserialize, Serialize};

/// Gemini generateContent request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

impl GeminiRequest {
    /// Build the single-turn request a comparison sends
    pub fn single_turn(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.into()),
                }],
            }],
            generation_config: GeminiGenerationConfig { temperature },
        }
    }
}

/// Gemini content block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Gemini content part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Gemini generation parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
}

/// Gemini generateContent response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Gemini response candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, or empty when
    /// structurally absent
    pub fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
            .unwrap_or_default()
    }
}
