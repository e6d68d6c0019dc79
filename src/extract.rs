//! Extractive question answering over ranked articles.
//!
//! Defines the [`QaModel`] trait seam and a concrete implementation,
//! [`HfQaModel`], backed by the Hugging Face Inference API's
//! question-answering task. The session can be driven by any `QaModel`,
//! which keeps the pipeline testable without network access.
//!
//! A per-article inference failure skips that article's contribution and is
//! logged at debug level; failing to construct the model at all is fatal to
//! the session (there is nothing to extract answers with).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::config::QaConfig;

/// An extracted answer span with the model's confidence.
#[derive(Debug, Clone)]
pub struct AnswerSpan {
    pub text: String,
    pub score: f64,
}

/// A loaded extractive-QA capability: question + context → best answer span.
///
/// `Ok(None)` means the model produced no usable span for this context;
/// `Err` means the invocation itself failed. Both are skipped by
/// [`extract_answers`], the latter with a debug log.
pub trait QaModel {
    fn answer(&self, question: &str, context: &str) -> Result<Option<AnswerSpan>>;
}

/// Extractive QA via the Hugging Face Inference API.
pub struct HfQaModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QaResponse {
    answer: String,
    #[serde(default)]
    score: f64,
}

impl HfQaModel {
    /// Build the model client from configuration.
    ///
    /// The API token is read from the environment variable named by
    /// `token_env`; when unset, requests are sent unauthenticated. A
    /// construction failure here must abort the session before the loop
    /// starts.
    pub fn load(config: &QaConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("nqa/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build QA model HTTP client")?;

        let endpoint = format!(
            "{}/models/{}",
            config.api_base.trim_end_matches('/'),
            config.model
        );
        let token = std::env::var(&config.token_env).ok();

        tracing::info!("Loaded QA model '{}'", config.model);
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }
}

impl QaModel for HfQaModel {
    fn answer(&self, question: &str, context: &str) -> Result<Option<AnswerSpan>> {
        let body = serde_json::json!({
            "inputs": {
                "question": question,
                "context": context,
            }
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response: QaResponse = request
            .send()
            .context("QA inference request failed")?
            .error_for_status()
            .context("QA inference returned an error status")?
            .json()
            .context("Failed to decode QA inference response")?;

        if response.answer.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(AnswerSpan {
            text: response.answer,
            score: response.score,
        }))
    }
}

/// Extract answer spans from the ranked articles, in ranked order.
///
/// The configured preamble is prepended to the user's query to form the
/// effective question. Articles whose extraction fails or yields nothing
/// contribute no entry, so the output is an order-preserving subsequence of
/// the input.
pub fn extract_answers(
    model: &dyn QaModel,
    query: &str,
    preamble: &str,
    articles: &[String],
) -> Vec<String> {
    let full_question = format!("{preamble} {query}");

    let mut answers = Vec::new();
    for article in articles {
        match model.answer(&full_question, article) {
            Ok(Some(span)) => answers.push(span.text),
            Ok(None) => {
                tracing::debug!("QA model returned no answer span for an article; skipping");
            }
            Err(e) => {
                tracing::debug!("QA extraction failed for an article; skipping: {e:#}");
            }
        }
    }

    tracing::info!("Extracted answers from {} articles", answers.len());
    answers
}
