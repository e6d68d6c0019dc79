//! # newsqa CLI (`nqa`)
//!
//! The `nqa` binary answers questions about a local news-article corpus.
//!
//! ## Usage
//!
//! ```bash
//! nqa --config ./config/nqa.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `nqa session` | Start the interactive read-query-print loop |
//! | `nqa ask "<query>"` | Answer a single question and exit |
//!
//! Startup loads the corpus (a missing or malformed file degrades to an
//! empty corpus) and the QA model client; a model load failure aborts with
//! a non-zero exit before any question is read.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use newsqa::config;
use newsqa::corpus::load_corpus;
use newsqa::extract::HfQaModel;
use newsqa::session::{Session, SessionSettings};
use newsqa::wiki::WikipediaClient;

/// newsqa CLI — question answering over a local news corpus.
#[derive(Parser)]
#[command(
    name = "nqa",
    about = "Ask questions about a local news-article corpus",
    version,
    long_about = "newsqa loads a JSON corpus of news articles, ranks them against your \
    question with BM25, extracts answer spans with a pretrained extractive-QA model, \
    and augments the result with a short Wikipedia summary."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/nqa.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive question-answering session.
    ///
    /// Reads questions from stdin until the exit keyword (or a blank line)
    /// is entered, then replays every accumulated summary.
    Session,

    /// Answer a single question and exit.
    ///
    /// Runs one full pipeline iteration (rank, extract, augment, format)
    /// and prints the summary.
    Ask {
        /// The question to answer.
        query: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("newsqa=info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    let articles = load_corpus(&cfg.corpus.path, &cfg.corpus.keywords);

    // Without the QA model there is nothing to answer with: fail before the
    // loop ever starts, with a non-zero exit.
    let qa = HfQaModel::load(&cfg.qa).context("Exiting due to QA model loading failure")?;
    let wiki = WikipediaClient::new(&cfg.wikipedia)?;

    let mut session = Session::new(
        SessionSettings::from(&cfg),
        articles,
        Box::new(qa),
        Box::new(wiki),
    );

    match cli.command {
        Commands::Session => {
            let stdin = io::stdin();
            session.run(stdin.lock(), io::stdout())?;
        }
        Commands::Ask { query } => {
            let summary = session.answer_query(&query);
            println!("{summary}");
        }
    }

    Ok(())
}
