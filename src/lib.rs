//! # edusearch
//!
//! A command-line front end for a combined Q&A and YouTube search backend,
//! with LLM summaries of the results.
//!
//! ## Features
//!
//! - **Validated Results**: The backend response is checked and typed into a `SearchResultBundle`
//! - **Bounded Prompts**: Only the top results, with long answers truncated, reach the LLM
//! - **Graceful Degradation**: A failed summary never hides the raw results

pub mod agent;
pub mod client;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod results;
pub mod summary;
pub mod ui;

pub use agent::Summarizer;
pub use client::{SearchClient, SearchError};
pub use config::Config;
pub use pipeline::{Aggregation, Engine};
pub use results::{QaResult, SearchResultBundle, VideoResult};
pub use summary::Summary;
