//! edusearch CLI - aggregated Q&A and video search with summaries
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use edusearch::{logging, pipeline, ui, Config, Engine};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edusearch")]
#[command(author, version, about = "Educational Q&A and video search with LLM summaries", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to edusearch.toml in cwd or ~/.config/edusearch)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question to search for
        query: String,
        /// Number of results per list (overrides config)
        #[arg(short)]
        k: Option<usize>,
        /// Print the raw search results as JSON and skip summarization
        #[arg(long)]
        raw: bool,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "edusearch", &mut std::io::stdout());
        }
        Some(Commands::Ask { query, k, raw }) => {
            let config = load_config(cli.config.as_ref())?;
            let k = k.unwrap_or(config.backend.k);

            if raw {
                match pipeline::search_only(&config, &query, k).await {
                    Ok(bundle) => println!("{}", serde_json::to_string_pretty(&bundle)?),
                    Err(edusearch::pipeline::EngineError::Search(e)) => {
                        println!("{}", ui::report_search_failure(&query, &e));
                    }
                    Err(e) => return Err(e.into()),
                }
            } else {
                let engine = Engine::new(&config)?.with_k(k)?;
                ui::ask(&engine, &query).await;
            }
        }
        None => {
            // Default: interactive session
            let config = load_config(cli.config.as_ref())?;
            let engine = Engine::new(&config)?;
            ui::run(&engine).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
