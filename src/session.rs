//! Interactive question-answering session.
//!
//! A two-state loop over an injected reader and writer:
//!
//! ```text
//! AwaitingQuery ──(exit keyword | blank line | EOF)──▶ Terminated
//!       │
//!       └─(query)─▶ rank → persist → extract → augment → format → print
//!                       └──────────────── loop ────────────────────┘
//! ```
//!
//! Each query recomputes the ranked set from scratch, overwrites the
//! ranked-articles side file, prints the formatted summary immediately, and
//! appends it to the accumulation list. On termination every accumulated
//! summary is replayed in production order. Console I/O goes through the
//! injected handles so the loop is testable without a terminal.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::extract::{extract_answers, QaModel};
use crate::rank::rank_articles;
use crate::summarize::format_summary;
use crate::wiki::{augment, TopicSource};

/// Session loop states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingQuery,
    Terminated,
}

/// Settings the loop needs per iteration, copied out of [`Config`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub top_n: usize,
    pub preamble: String,
    pub ranked_articles_path: PathBuf,
    pub exit_keyword: String,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            top_n: config.retrieval.top_n,
            preamble: config.qa.preamble.clone(),
            ranked_articles_path: config.session.ranked_articles_path.clone(),
            exit_keyword: config.session.exit_keyword.clone(),
        }
    }
}

/// One interactive session: owns the corpus, the QA model, the knowledge
/// source, and the summaries accumulated so far.
pub struct Session {
    settings: SessionSettings,
    corpus: Vec<String>,
    qa: Box<dyn QaModel>,
    wiki: Box<dyn TopicSource>,
    summaries: Vec<String>,
    state: SessionState,
}

impl Session {
    pub fn new(
        settings: SessionSettings,
        corpus: Vec<String>,
        qa: Box<dyn QaModel>,
        wiki: Box<dyn TopicSource>,
    ) -> Self {
        Self {
            settings,
            corpus,
            qa,
            wiki,
            summaries: Vec::new(),
            state: SessionState::AwaitingQuery,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }

    /// Run one full pipeline iteration for a query and return the summary.
    ///
    /// Ranked articles are persisted to the side file before extraction;
    /// a write failure is logged and does not block the remaining stages.
    pub fn answer_query(&mut self, query: &str) -> String {
        let ranked = rank_articles(query, &self.corpus, self.settings.top_n);
        save_ranked_articles(&self.settings.ranked_articles_path, &ranked);

        let answers = extract_answers(self.qa.as_ref(), query, &self.settings.preamble, &ranked);
        let wiki_summary = augment(self.wiki.as_ref(), query);

        format_summary(query, &answers, &wiki_summary)
    }

    /// Drive the read-query-print loop until the exit keyword, a blank
    /// line, or EOF, then replay the accumulated summaries.
    pub fn run(&mut self, mut input: impl BufRead, mut output: impl Write) -> Result<()> {
        while self.state == SessionState::AwaitingQuery {
            write!(
                output,
                "\n\nEnter your question (or type '{}' to quit): ",
                self.settings.exit_keyword
            )?;
            output.flush()?;

            let mut line = String::new();
            let bytes_read = input.read_line(&mut line)?;
            let query = line.trim();

            if bytes_read == 0
                || query.is_empty()
                || query.eq_ignore_ascii_case(&self.settings.exit_keyword)
            {
                self.state = SessionState::Terminated;
                break;
            }

            let summary = self.answer_query(query);
            writeln!(output, "{summary}")?;
            self.summaries.push(summary);
        }

        writeln!(output, "\nAccumulated Answers:")?;
        for summary in &self.summaries {
            writeln!(output, "{summary} \n")?;
        }

        Ok(())
    }
}

/// Overwrite the side file with the ranked articles, one per line.
fn save_ranked_articles(path: &Path, articles: &[String]) {
    let mut content = articles.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    match std::fs::write(path, content) {
        Ok(()) => tracing::info!("Saved {} articles to {}", articles.len(), path.display()),
        Err(e) => tracing::warn!(
            "Error saving ranked articles to {}: {}",
            path.display(),
            e
        ),
    }
}
