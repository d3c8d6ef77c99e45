//! Search-then-summarize pipeline.

use crate::agent::{AgentError, Summarizer};
use crate::client::{SearchClient, SearchError};
use crate::config::{Config, ConfigError};
use crate::results::SearchResultBundle;
use crate::summary::Summary;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Everything produced for one query
#[derive(Debug)]
pub struct Aggregation {
    pub query: String,
    pub bundle: SearchResultBundle,
    pub summary: Summary,
}

/// Runs a query against the search backend and summarizes the results.
pub struct Engine {
    search: SearchClient,
    summarizer: Summarizer,
    k: usize,
}

impl Engine {
    /// Build an engine from validated configuration
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        config.validate()?;
        let search = SearchClient::new(&config.backend)?;
        let summarizer = Summarizer::new(&config.agent, config.api_key()?)?;
        Ok(Self {
            search,
            summarizer,
            k: config.backend.k,
        })
    }

    /// Use a different result count than the configured one
    pub fn with_k(mut self, k: usize) -> Result<Self, EngineError> {
        self.k = check_k(k)?;
        Ok(self)
    }

    #[cfg(test)]
    pub(crate) fn k(&self) -> usize {
        self.k
    }

    /// Search and summarize.
    ///
    /// A search failure is returned as `Err`; a summary failure is reported
    /// inside the [`Aggregation`] so the raw results stay available.
    pub async fn run(&self, query: &str) -> Result<Aggregation, SearchError> {
        let bundle = self.search.search(query, self.k).await?;
        let summary = self
            .summarizer
            .summarize(&bundle.qa_results, &bundle.yt_results, query)
            .await;

        Ok(Aggregation {
            query: query.to_string(),
            bundle,
            summary,
        })
    }
}

/// Run a search without summarizing; needs only the backend settings.
pub async fn search_only(config: &Config, query: &str, k: usize) -> Result<SearchResultBundle, EngineError> {
    config.validate_backend()?;
    check_k(k)?;
    let client = SearchClient::new(&config.backend)?;
    Ok(client.search(query, k).await?)
}

fn check_k(k: usize) -> Result<usize, ConfigError> {
    if k == 0 {
        return Err(ConfigError::Invalid("k must be greater than 0".to_string()));
    }
    Ok(k)
}
