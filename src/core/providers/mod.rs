//! Provider implementations

pub mod chatgpt;
pub mod gemini;

pub use chatgpt::ChatGptClient;
pub use gemini::GeminiClient;
