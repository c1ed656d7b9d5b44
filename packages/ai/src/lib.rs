// ABOUTME: Generative-AI integration for TaskGen
// ABOUTME: Text-generation trait and the Gemini API client implementing it

pub mod service;

pub use service::{AiError, AiResult, GeminiClient, TextGenerator, CHAT_FALLBACK_REPLY};
