//! Terminal rendering and the interactive query loop.

use crate::client::SearchError;
use crate::pipeline::{Aggregation, Engine};
use crate::results::{QaResult, SearchResultBundle, VideoResult};
use crate::summary::Summary;
use colored::Colorize;
use dialoguer::Input;

/// Shown to the user whenever a search fails, whatever the cause
pub const SEARCH_FAILED: &str = "Failed to retrieve results from the service. \
     Please check that the service address is correct and the backend is running.";

const RULE: &str = "────────────────────────────────────────";

/// Render the summary and both result lists
pub fn render(aggregation: &Aggregation) -> String {
    let mut out = render_summary(&aggregation.summary);
    out.push_str(&format!("\n{}\n\n", RULE.dimmed()));
    out.push_str(&render_results(&aggregation.bundle));
    out
}

/// Render the summary block, including the reason a summary failed
pub fn render_summary(summary: &Summary) -> String {
    let mut out = format!("{}\n\n", "💡 Summary:".bold());
    out.push_str(summary.text());
    out.push('\n');
    if let Some(e) = summary.error() {
        out.push_str(&format!("\n{} {}\n", "⚠".yellow().bold(), e.to_string().yellow()));
    }
    out
}

/// Render the raw QA and video results
pub fn render_results(bundle: &SearchResultBundle) -> String {
    let mut out = String::new();

    if bundle.is_empty() {
        out.push_str(&format!("{}\n", "No relevant Q&A results found.".blue()));
        out.push_str(&format!("{}\n", "No relevant YouTube videos found.".blue()));
        return out;
    }

    out.push_str(&format!("{}\n\n", "Detailed Information Sources".bold().underline()));

    if !bundle.qa_results.is_empty() {
        out.push_str(&format!("{}\n\n", "📚 Related Q&A".bold()));
        for qa in &bundle.qa_results {
            render_qa(&mut out, qa);
        }
    }

    if !bundle.yt_results.is_empty() {
        out.push_str(&format!("{}\n\n", "🎬 Related Videos".bold()));
        for video in &bundle.yt_results {
            render_video(&mut out, video);
        }
    }

    out
}

fn render_qa(out: &mut String, qa: &QaResult) {
    out.push_str(&format!("  {} {}\n", "Question:".cyan(), qa.question_text().bold()));
    out.push_str(&format!("  {} {}\n", "Answer:".cyan(), qa.answer_text()));
    if let Some(level) = qa.level.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("  {}\n", format!("Level: {}", level).dimmed()));
    }
    if let Some(similarity) = qa.similarity {
        out.push_str(&format!("  {}\n", format!("Similarity: {:.4}", similarity).dimmed()));
    }
    out.push('\n');
}

fn render_video(out: &mut String, video: &VideoResult) {
    out.push_str(&format!("  {}\n", video.title_text().bold()));
    if let Some(url) = video.watch_url() {
        out.push_str(&format!("  {}\n", url.underline()));
    }
    if let Some(similarity) = video.similarity {
        out.push_str(&format!("  {}\n", format!("Similarity: {:.4}", similarity).dimmed()));
    }
    out.push('\n');
}

/// Log the details of a failed search and return the message for the user
pub fn report_search_failure(query: &str, error: &SearchError) -> String {
    tracing::error!(%query, error = %error, "search failed");
    if let SearchError::Schema { payload, .. } = error {
        tracing::warn!("received payload:\n{}", payload);
    }
    format!("{} {}", "✗".red().bold(), SEARCH_FAILED.red())
}

/// Run one query and print the outcome
pub async fn ask(engine: &Engine, query: &str) {
    eprintln!("{}", format!("Aggregating information for \"{}\"...", query).dimmed());
    match engine.run(query).await {
        Ok(aggregation) => println!("{}", render(&aggregation)),
        Err(e) => println!("{}", report_search_failure(query, &e)),
    }
}

/// Interactive loop: prompt for queries until the user leaves.
///
/// An empty line, `exit` or `quit` ends the session.
pub async fn run(engine: &Engine) -> Result<(), dialoguer::Error> {
    println!("{}", "🔍 Educational Information Search Engine".bold());
    println!("Enter your question to get answers and related information sources.\n");

    loop {
        let line: String = Input::new()
            .with_prompt("Question")
            .allow_empty(true)
            .interact_text()?;

        let query = line.trim();
        if query.is_empty() || query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }

        ask(engine, query).await;
        println!();
    }

    Ok(())
}
