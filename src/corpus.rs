//! Corpus loading and keyword filtering.
//!
//! Reads a JSON array of news-article records, keeps only the records whose
//! body mentions at least one configured keyword, and strips punctuation
//! from the retained text. A missing or malformed corpus file degrades to
//! an empty corpus rather than failing: downstream stages simply have
//! nothing to rank.

use serde::Deserialize;
use std::path::Path;

/// Raw on-disk record. Only the body is used; records without one are
/// skipped rather than treated as an error.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(rename = "articleBody")]
    article_body: Option<String>,
}

/// Load the corpus and return the cleaned article texts, in file order.
///
/// An article is retained when its body contains at least one keyword as a
/// case-sensitive substring. Retained text has every character that is not
/// alphanumeric, underscore, or whitespace removed; case is left untouched.
pub fn load_corpus(path: &Path, keywords: &[String]) -> Vec<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Error loading corpus from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let records: Vec<RawArticle> = match serde_json::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Error parsing corpus file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let articles: Vec<String> = records
        .into_iter()
        .filter_map(|record| record.article_body)
        .filter(|body| keywords.iter().any(|k| body.contains(k.as_str())))
        .map(|body| strip_punctuation(&body))
        .collect();

    tracing::info!("Loaded and preprocessed {} articles", articles.len());
    articles
}

/// Remove every character that is not a word character or whitespace.
fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
