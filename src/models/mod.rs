//! API data models
//!
//! This module contains the comparison record structures and the wire
//! formats for the OpenAI and Gemini APIs.

pub mod comparison;
pub mod gemini;
pub mod openai;
