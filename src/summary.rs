//! Summary outcome - the result of one summarization attempt.

use crate::agent::AgentError;

/// Shown when neither result list has anything to summarize
pub const NO_INFORMATION: &str = "No relevant information found to summarize.";

/// Shown when the LLM call fails
pub const GENERATION_FAILED: &str = "Summary generation failed.";

/// Outcome of summarizing one search.
///
/// Summarization never aborts the pipeline: failures are carried here so the
/// caller can still display the raw results.
#[derive(Debug)]
pub enum Summary {
    /// Trimmed text of the model's first choice
    Generated(String),
    /// Both result lists were empty; no request was made
    NothingToSummarize,
    /// The LLM call failed
    Failed(AgentError),
}

impl Summary {
    /// Text to display for this outcome
    pub fn text(&self) -> &str {
        match self {
            Summary::Generated(text) => text,
            Summary::NothingToSummarize => NO_INFORMATION,
            Summary::Failed(_) => GENERATION_FAILED,
        }
    }

    /// The error behind a failed summary, if any
    pub fn error(&self) -> Option<&AgentError> {
        match self {
            Summary::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Summary::Generated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text() {
        assert_eq!(Summary::Generated("Bake at 350F.".into()).text(), "Bake at 350F.");
        assert_eq!(Summary::NothingToSummarize.text(), NO_INFORMATION);

        let failed = Summary::Failed(AgentError::Auth("bad key".into()));
        assert_eq!(failed.text(), GENERATION_FAILED);
        assert!(failed.error().is_some());
        assert!(!failed.is_generated());
    }
}
