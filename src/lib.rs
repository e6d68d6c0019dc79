//! # newsqa
//!
//! An interactive question-answering pipeline over a local news-article
//! corpus: keyword-filtered loading, BM25 lexical ranking, extractive QA on
//! the top articles, Wikipedia augmentation, and a read-query-print loop.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────┐   ┌────────┐   ┌───────────┐   ┌───────────┐
//! │ Corpus │──▶│  BM25  │──▶│ Extractive│──▶│ Formatted │
//! │ Loader │   │ Ranker │   │    QA     │   │  Summary  │
//! └────────┘   └────────┘   └───────────┘   └─────┬─────┘
//!                                ▲                │
//!                          ┌─────┴─────┐    ┌─────▼─────┐
//!                          │ Wikipedia │    │  Session  │
//!                          │ Augmenter │    │   Loop    │
//!                          └───────────┘    └───────────┘
//! ```
//!
//! Everything is single-threaded and synchronous; each query iteration runs
//! the full pipeline to completion before the next prompt.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Corpus loading and keyword filtering |
//! | [`rank`] | BM25 lexical relevance ranking |
//! | [`extract`] | Extractive QA ([`extract::QaModel`] seam + HF Inference API) |
//! | [`wiki`] | Wikipedia augmentation ([`wiki::TopicSource`] seam) |
//! | [`summarize`] | Summary formatting |
//! | [`session`] | Interactive session loop |

pub mod config;
pub mod corpus;
pub mod extract;
pub mod rank;
pub mod session;
pub mod summarize;
pub mod wiki;
