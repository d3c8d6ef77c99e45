//! Search result records returned by the QA and YouTube backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown for fields the backend left out
pub const NOT_AVAILABLE: &str = "N/A";

/// Identifier of a QA record; the backend sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

/// A question-answer pair from the QA index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaResult {
    /// 0-based relevance position
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub qa_id: Option<ItemId>,
    #[serde(rename = "Question", default)]
    pub question: Option<String>,
    #[serde(rename = "Answer", default)]
    pub answer: Option<String>,
    /// Difficulty or education level, if tagged
    #[serde(rename = "Level", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl QaResult {
    pub fn question_text(&self) -> &str {
        self.question.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn answer_text(&self) -> &str {
        self.answer.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// A video reference from the YouTube index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl VideoResult {
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Watch URL for the video, if the backend supplied an id
    pub fn watch_url(&self) -> Option<String> {
        self.video_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.youtube.com/watch?v={}", id))
    }
}

/// The paired result lists from one search call, in backend rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultBundle {
    pub qa_results: Vec<QaResult>,
    pub yt_results: Vec<VideoResult>,
}

impl SearchResultBundle {
    /// Check if both lists are empty
    pub fn is_empty(&self) -> bool {
        self.qa_results.is_empty() && self.yt_results.is_empty()
    }
}
