//! Wikipedia knowledge augmentation.
//!
//! Fetches a short topic summary from the MediaWiki API to enrich the
//! per-query answer. Lookup outcomes are modeled as an explicit tagged type
//! ([`Lookup`]) instead of exceptions:
//!
//! - `Found` — a plain-text extract for the topic.
//! - `Ambiguous` — the topic resolved to a disambiguation page; the
//!   candidate article titles are returned so the caller can retry.
//! - `Missing` — no such page.
//! - `Failed` — transport, decoding, or service faults.
//!
//! [`augment`] consumes a lookup: ambiguous topics are retried once with the
//! first candidate, and every other non-`Found` outcome degrades to a fixed
//! fallback string. A query iteration never aborts because Wikipedia was
//! unreachable.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::config::WikipediaConfig;

/// Returned when a topic is missing or every recovery path failed.
pub const FALLBACK_SUMMARY: &str = "No additional information found.";

/// Outcome of a single topic lookup.
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(String),
    Ambiguous(Vec<String>),
    Missing,
    Failed(String),
}

/// A knowledge service that can be asked for a topic summary.
pub trait TopicSource {
    fn lookup(&self, topic: &str) -> Lookup;
}

/// Produce the knowledge summary for a query, with fallback behavior.
///
/// A disambiguation result is retried once using the first candidate title;
/// if the retry does not land on a concrete page either, the fallback string
/// is returned. `Missing` and `Failed` also degrade to the fallback, the
/// latter with a warning log.
pub fn augment(source: &dyn TopicSource, query: &str) -> String {
    match source.lookup(query) {
        Lookup::Found(summary) => summary,
        Lookup::Ambiguous(options) => match options.first() {
            Some(first) => match source.lookup(first) {
                Lookup::Found(summary) => summary,
                other => {
                    tracing::warn!(
                        "Disambiguation retry for '{first}' did not resolve ({other:?}); \
                         using fallback"
                    );
                    FALLBACK_SUMMARY.to_string()
                }
            },
            None => FALLBACK_SUMMARY.to_string(),
        },
        Lookup::Missing => FALLBACK_SUMMARY.to_string(),
        Lookup::Failed(reason) => {
            tracing::warn!("Wikipedia lookup failed: {reason}; using fallback");
            FALLBACK_SUMMARY.to_string()
        }
    }
}

/// Topic summaries from the MediaWiki query API.
pub struct WikipediaClient {
    client: reqwest::blocking::Client,
    api_base: String,
    sentences: u32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
    pageprops: Option<PageProps>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    /// Present (as an empty string) when the page is a disambiguation page.
    disambiguation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: String,
}

impl WikipediaClient {
    pub fn new(config: &WikipediaConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("nqa/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build Wikipedia HTTP client")?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            sentences: config.sentences,
        })
    }

    /// One round trip to the API: extract, disambiguation marker, and
    /// outbound links for the titled page, following redirects.
    fn fetch_page(&self, topic: &str) -> Result<ApiResponse> {
        let sentences = self.sentences.to_string();
        let response = self
            .client
            .get(&self.api_base)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("redirects", "1"),
                ("titles", topic),
                ("prop", "extracts|pageprops|links"),
                ("explaintext", "1"),
                ("exsentences", sentences.as_str()),
                ("plnamespace", "0"),
                ("pllimit", "max"),
            ])
            .send()
            .context("Wikipedia request failed")?
            .error_for_status()
            .context("Wikipedia returned an error status")?;

        response
            .json()
            .context("Failed to decode Wikipedia response")
    }
}

impl TopicSource for WikipediaClient {
    fn lookup(&self, topic: &str) -> Lookup {
        let response = match self.fetch_page(topic) {
            Ok(r) => r,
            Err(e) => return Lookup::Failed(format!("{e:#}")),
        };

        let page = match response.query.and_then(|q| q.pages.into_iter().next()) {
            Some(p) => p,
            None => return Lookup::Missing,
        };

        if page.missing {
            return Lookup::Missing;
        }

        if page
            .pageprops
            .as_ref()
            .is_some_and(|p| p.disambiguation.is_some())
        {
            let options: Vec<String> = page.links.into_iter().map(|l| l.title).collect();
            return Lookup::Ambiguous(options);
        }

        match page.extract {
            Some(extract) if !extract.trim().is_empty() => Lookup::Found(extract),
            _ => Lookup::Failed(format!("Page for '{topic}' had no extract")),
        }
    }
}
