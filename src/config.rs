//! TOML configuration parsing.
//!
//! All runtime settings are read from a single TOML file passed via the
//! `--config` flag. Every section and field has a default, so a minimal
//! (even empty) file is valid; `load_config` additionally rejects values
//! that would make the pipeline degenerate (zero result limit, empty
//! keyword set, zero-sentence summaries).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub qa: QaConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Corpus file location and the keyword filter applied at load time.
#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    /// An article is kept only if its body contains at least one of these
    /// keywords (case-sensitive substring match).
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            keywords: default_keywords(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("./data/news.article.json")
}
fn default_keywords() -> Vec<String> {
    ["Israel", "Hamas", "Palestine", "Gaza", "war", "conflict"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    /// Maximum number of articles returned by the ranker per query.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

/// Extractive question-answering model settings.
#[derive(Debug, Deserialize, Clone)]
pub struct QaConfig {
    /// Base URL of the inference API.
    #[serde(default = "default_qa_api_base")]
    pub api_base: String,
    /// Model identifier, appended to `{api_base}/models/`.
    #[serde(default = "default_qa_model")]
    pub model: String,
    /// Environment variable holding the API token. Unset means
    /// unauthenticated requests.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Instructional preamble prepended to every user question before it is
    /// sent to the model.
    #[serde(default = "default_preamble")]
    pub preamble: String,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            api_base: default_qa_api_base(),
            model: default_qa_model(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            preamble: default_preamble(),
        }
    }
}

fn default_qa_api_base() -> String {
    "https://api-inference.huggingface.co".to_string()
}
fn default_qa_model() -> String {
    "bert-large-uncased-whole-word-masking-finetuned-squad".to_string()
}
fn default_token_env() -> String {
    "HF_API_TOKEN".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_preamble() -> String {
    "You are an investigative bot designed to analyze news articles. \
     Summarize the following content based on the user's question in 4-5 \
     sentences to the best of your ability and knowledge."
        .to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct WikipediaConfig {
    /// MediaWiki API endpoint.
    #[serde(default = "default_wiki_api_base")]
    pub api_base: String,
    /// Number of sentences requested per topic summary.
    #[serde(default = "default_sentences")]
    pub sentences: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_base: default_wiki_api_base(),
            sentences: default_sentences(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_wiki_api_base() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}
fn default_sentences() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Side file rewritten with the ranked articles on every query.
    #[serde(default = "default_ranked_articles_path")]
    pub ranked_articles_path: PathBuf,
    /// Typing this word (case-insensitive) ends the session.
    #[serde(default = "default_exit_keyword")]
    pub exit_keyword: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ranked_articles_path: default_ranked_articles_path(),
            exit_keyword: default_exit_keyword(),
        }
    }
}

fn default_ranked_articles_path() -> PathBuf {
    PathBuf::from("./data/top_articles.txt")
}
fn default_exit_keyword() -> String {
    "exit".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.retrieval.top_n == 0 {
        anyhow::bail!("retrieval.top_n must be >= 1");
    }

    if config.corpus.keywords.is_empty() {
        anyhow::bail!("corpus.keywords must contain at least one keyword");
    }

    if config.wikipedia.sentences == 0 {
        anyhow::bail!("wikipedia.sentences must be >= 1");
    }

    if config.session.exit_keyword.trim().is_empty() {
        anyhow::bail!("session.exit_keyword must not be blank");
    }

    Ok(config)
}
