//! OpenAI API data models
//!
//! Request and response structures for the chat-completions endpoint.
//! Response fields are optional across the board so a structurally
//! unexpected success body degrades to empty output instead of a decode
//! error.

use serde::{Deserialize, Serialize};

/// OpenAI message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAIMessage {
    /// Build the single user-role message a comparison sends
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }
}

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChatCompletionRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub temperature: f32,
}

/// OpenAI chat completion response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

/// OpenAI choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChoice {
    #[serde(default)]
    pub message: Option<OpenAIMessage>,
}

/// OpenAI usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpenAIUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl OpenAIChatCompletionResponse {
    /// Text of the first choice, or empty when structurally absent
    pub fn first_text(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_shape() {
        let request = OpenAIChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![OpenAIMessage::user("Say hi")],
            temperature: 0.7,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Say hi");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_first_text_from_normal_response() {
        let response: OpenAIChatCompletionResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "Hello!"}}],
                "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}
            }"#,
        )
        .unwrap();

        assert_eq!(response.first_text(), "Hello!");
        assert_eq!(response.usage.unwrap().total_tokens, 5);
    }

    #[test]
    fn test_first_text_tolerates_missing_pieces() {
        let empty: OpenAIChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_text(), "");
        assert!(empty.usage.is_none());

        let no_content: OpenAIChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert_eq!(no_content.first_text(), "");

        let no_message: OpenAIChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{}]}"#).unwrap();
        assert_eq!(no_message.first_text(), "");
    }
}
