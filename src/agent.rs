//! LLM agent module for summarizing search results.
//!
//! Builds a bounded prompt from the top QA and video results and sends it to
//! an OpenAI-compatible chat completion endpoint.

pub use crate::summary::Summary;

use crate::config::AgentConfig;
use crate::results::{QaResult, VideoResult};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Number of results of each kind included in the prompt
pub const MAX_PROMPT_RESULTS: usize = 3;

/// Answers longer than this many characters are cut in the prompt
pub const MAX_ANSWER_CHARS: usize = 500;

const TRUNCATION_MARKER: &str = "...";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("LLM request timed out")]
    Timeout,
    #[error("LLM request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("LLM returned no completion text")]
    EmptyResponse,
    #[error("invalid LLM client setup: {0}")]
    Client(String),
}

impl From<reqwest::Error> for AgentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AgentError::Timeout
        } else if e.is_decode() {
            AgentError::Parse(e.to_string())
        } else {
            AgentError::Connection(e.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizes search results through a chat completion API.
pub struct Summarizer {
    client: Client,
    api_key: String,
    model: String,
    persona: String,
    completions_url: Url,
}

impl Summarizer {
    /// Create a summarizer for the configured model
    pub fn new(config: &AgentConfig, api_key: &str) -> Result<Self, AgentError> {
        let base = config.api_base.trim().trim_end_matches('/');
        let completions_url = Url::parse(&format!("{}/chat/completions", base))
            .map_err(|e| AgentError::Client(format!("bad API base URL {:?}: {}", config.api_base, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: config.model.clone(),
            persona: config.persona.clone(),
            completions_url,
        })
    }

    /// Summarize the results for `query`.
    ///
    /// Never fails: an empty search short-circuits without a request, and
    /// LLM errors are logged and returned inside [`Summary::Failed`].
    pub async fn summarize(&self, qa_results: &[QaResult], yt_results: &[VideoResult], query: &str) -> Summary {
        if qa_results.is_empty() && yt_results.is_empty() {
            return Summary::NothingToSummarize;
        }

        let prompt = build_prompt(query, qa_results, yt_results);
        match self.complete(&prompt).await {
            Ok(text) => Summary::Generated(text),
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "LLM API call failed");
                Summary::Failed(e)
            }
        }
    }

    /// Send a single-turn chat request and return the first choice's text
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.persona,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        tracing::debug!(model = %self.model, chars = prompt.len(), "requesting summary");

        let response = self
            .client
            .post(self.completions_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Auth(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Http { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AgentError::Parse(format!("{}: {}", e, body)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AgentError::EmptyResponse)
    }
}

/// Cut an answer to [`MAX_ANSWER_CHARS`] characters, marking the cut.
///
/// Counts characters, not bytes, so multi-byte text is never split mid code point.
pub fn truncate_answer(text: &str) -> String {
    match text.char_indices().nth(MAX_ANSWER_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Build the summarization prompt from the top results of each list
pub fn build_prompt(query: &str, qa_results: &[QaResult], yt_results: &[VideoResult]) -> String {
    let mut prompt = format!("User question: {}\n\n", query);
    prompt.push_str(
        "Based on the following Question-Answering (QA) and YouTube video information, \
         please provide a concise summary for the user, appropriately combining content \
         from both sources to answer the user's question.\n\n",
    );

    prompt.push_str("--- QA Results ---\n");
    if qa_results.is_empty() {
        prompt.push_str("No relevant QA content found.\n\n");
    }
    for (i, qa) in qa_results.iter().take(MAX_PROMPT_RESULTS).enumerate() {
        prompt.push_str(&format!(
            "QA {}: Question: {}\nAnswer: {}\n\n",
            i + 1,
            qa.question_text(),
            truncate_answer(qa.answer_text())
        ));
    }

    prompt.push_str("--- YouTube Video Results ---\n");
    if yt_results.is_empty() {
        prompt.push_str("No relevant YouTube videos found.\n\n");
    }
    for (i, yt) in yt_results.iter().take(MAX_PROMPT_RESULTS).enumerate() {
        prompt.push_str(&format!("Video {}: Title: {}\n\n", i + 1, yt.title_text()));
    }

    prompt.push_str("Please provide a comprehensive answer and summary:");
    prompt
}
