// ABOUTME: Gemini API client for task generation and chat replies
// ABOUTME: Stateless request/response wrappers, no retry, no caching

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const MAX_GENERATED_TASKS: usize = 5;

/// Reply used when the chat endpoint returns no usable text.
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("No content returned from the generation API")]
    EmptyResponse,
}

pub type AiResult<T> = Result<T, AiError>;

/// The seam between resource services and the external generative endpoint.
/// Handlers depend on this trait so persistence logic is testable without a
/// live network dependency.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce up to five short task titles for a topic. Fails when the
    /// external response carries no extractable text.
    async fn generate_tasks(&self, topic: &str) -> AiResult<Vec<String>>;

    /// Produce a conversational reply to a user message, falling back to
    /// [`CHAT_FALLBACK_REPLY`] when the response carries no text.
    async fn chat(&self, message: &str) -> AiResult<String>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the Google generative-language `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        if model != DEFAULT_MODEL {
            info!("Using custom generation model: {}", model);
        }

        Self {
            client: Self::create_client(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests to target a mock
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send prompt segments and return the first candidate's text, if any.
    async fn generate_content(&self, segments: Vec<String>) -> AiResult<Option<String>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: segments
                .into_iter()
                .map(|text| Content {
                    parts: vec![Part { text }],
                })
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Generation API error: {} - {}", status, error_text);
            return Err(AiError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text);

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_tasks(&self, topic: &str) -> AiResult<Vec<String>> {
        info!("Requesting generated tasks for topic: {}", topic);

        let raw = self
            .generate_content(vec![generation_prompt(topic)])
            .await?
            .ok_or(AiError::EmptyResponse)?;

        Ok(parse_task_lines(&raw))
    }

    async fn chat(&self, message: &str) -> AiResult<String> {
        let segments = vec![
            CHAT_PERSONA.to_string(),
            format!("User: {}\nAssistant:", message),
        ];

        match self.generate_content(segments).await? {
            Some(reply) => Ok(reply),
            None => Ok(CHAT_FALLBACK_REPLY.to_string()),
        }
    }
}

const CHAT_PERSONA: &str = "You are TaskBot, the friendly productivity assistant built into the \
TaskGen task manager. You help users create, organize, prioritize, and complete their tasks and \
categories. Keep replies short and conversational, stay encouraging when users feel overwhelmed, \
and close with a concrete next step when one would help.";

fn generation_prompt(topic: &str) -> String {
    format!(
        "You are helping someone learn about \"{topic}\" in a practical, hands-on way. \
Write exactly 5 short, specific, actionable tasks, each completable in 1-4 hours, ordered \
from beginner to more advanced and focused on doing rather than reading. Return only the \
5 tasks as plain bullet points with no extra text."
    )
}

/// Split candidate text into task titles: strip a leading run of
/// bullet/numbering characters per line, drop empty lines, keep at most five.
fn parse_task_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .take(MAX_GENERATED_TASKS)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start()
        .trim_start_matches(|c: char| matches!(c, '•' | '-' | '*' | '.') || c.is_ascii_digit())
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bullets_and_numbering() {
        assert_eq!(strip_bullet("• Set up a project"), "Set up a project");
        assert_eq!(strip_bullet("- Build a to-do list"), "Build a to-do list");
        assert_eq!(strip_bullet("3. Deploy the app"), "Deploy the app");
        assert_eq!(strip_bullet("10. Review notes"), "Review notes");
        assert_eq!(strip_bullet("* Write docs"), "Write docs");
    }

    #[test]
    fn keeps_digits_inside_titles() {
        // The strip run ends at the first space, so counts survive.
        assert_eq!(strip_bullet("- 10 practice exercises"), "10 practice exercises");
    }

    #[test]
    fn parse_drops_empty_lines_and_caps_at_five() {
        let raw = "• One\n\n• Two\n• Three\n• Four\n• Five\n• Six";
        let tasks = parse_task_lines(raw);
        assert_eq!(tasks, vec!["One", "Two", "Three", "Four", "Five"]);
    }

    #[test]
    fn parse_of_blank_text_yields_nothing() {
        assert!(parse_task_lines("\n\n   \n").is_empty());
    }
}
