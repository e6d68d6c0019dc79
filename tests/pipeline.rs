//! End-to-end pipeline tests: corpus file → loader → ranker → extractor →
//! augmenter → formatter → session loop, using stub model and knowledge
//! source implementations so no network access is required.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use newsqa::corpus::load_corpus;
use newsqa::extract::{AnswerSpan, QaModel};
use newsqa::rank::rank_articles;
use newsqa::session::{Session, SessionSettings};
use newsqa::summarize::format_summary;
use newsqa::wiki::{augment, Lookup, TopicSource, FALLBACK_SUMMARY};

struct EchoModel;

impl QaModel for EchoModel {
    fn answer(&self, _question: &str, context: &str) -> Result<Option<AnswerSpan>> {
        Ok(Some(AnswerSpan {
            text: format!("span[{context}]"),
            score: 1.0,
        }))
    }
}

/// Ambiguous on the raw query, concrete on the first suggested topic.
struct DisambiguatingWiki;

impl TopicSource for DisambiguatingWiki {
    fn lookup(&self, topic: &str) -> Lookup {
        match topic {
            "Topic A" => Lookup::Found("Summary for Topic A.".to_string()),
            "Topic B" => Lookup::Found("Summary for Topic B.".to_string()),
            _ => Lookup::Ambiguous(vec!["Topic A".to_string(), "Topic B".to_string()]),
        }
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

fn write_corpus(tmp: &TempDir, content: &str) -> PathBuf {
    let path = tmp.path().join("news.article.json");
    fs::write(&path, content).unwrap();
    path
}

fn settings(tmp: &TempDir) -> SessionSettings {
    SessionSettings {
        top_n: 10,
        preamble: "Summarize.".to_string(),
        ranked_articles_path: tmp.path().join("top_articles.txt"),
        exit_keyword: "exit".to_string(),
    }
}

#[test]
fn loader_keeps_only_keyword_matches() {
    let tmp = TempDir::new().unwrap();
    let path = write_corpus(
        &tmp,
        r#"[
            {"articleBody": "The war entered its second month."},
            {"articleBody": "Stock markets rallied on Friday."},
            {"articleBody": "Aid convoys crossed the border as the war spread."}
        ]"#,
    );

    let articles = load_corpus(&path, &keywords(&["war"]));
    assert_eq!(articles.len(), 2);
    for article in &articles {
        assert!(article.contains("war"));
    }
}

#[test]
fn empty_corpus_file_degrades_through_the_whole_pipeline() {
    let tmp = TempDir::new().unwrap();
    let path = write_corpus(&tmp, "[]");

    let articles = load_corpus(&path, &keywords(&["war"]));
    assert!(articles.is_empty());

    let ranked = rank_articles("what happened", &articles, 10);
    assert!(ranked.is_empty());

    // The formatter still produces a usable block with an empty answer set.
    let summary = format_summary("what happened", &[], FALLBACK_SUMMARY);
    assert!(summary.contains("what happened"));
    assert!(summary.contains(FALLBACK_SUMMARY));
}

#[test]
fn ranked_set_flows_into_extraction_in_order() {
    let tmp = TempDir::new().unwrap();
    let path = write_corpus(
        &tmp,
        r#"[
            {"articleBody": "war war war in the capital"},
            {"articleBody": "a brief mention of war"},
            {"articleBody": "weather tomorrow is sunny with war"}
        ]"#,
    );

    let articles = load_corpus(&path, &keywords(&["war"]));
    let ranked = rank_articles("war in the capital", &articles, 2);
    assert_eq!(ranked.len(), 2);
    assert!(ranked[0].contains("capital"));

    let answers =
        newsqa::extract::extract_answers(&EchoModel, "war in the capital", "Summarize.", &ranked);
    assert_eq!(answers.len(), 2);
    assert!(answers[0].contains("capital"));
}

#[test]
fn ambiguous_topic_resolves_to_first_candidate() {
    let summary = augment(&DisambiguatingWiki, "Topic");
    assert_eq!(summary, "Summary for Topic A.");
}

#[test]
fn full_session_over_a_real_corpus_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_corpus(
        &tmp,
        r#"[
            {"articleBody": "Ceasefire negotiations continued as the war reached the coast."},
            {"articleBody": "A cooking festival drew large crowds."}
        ]"#,
    );

    let articles = load_corpus(&path, &keywords(&["war"]));
    assert_eq!(articles.len(), 1);

    let settings = settings(&tmp);
    let side_file = settings.ranked_articles_path.clone();
    let mut session = Session::new(
        settings,
        articles,
        Box::new(EchoModel),
        Box::new(DisambiguatingWiki),
    );

    let mut out = Vec::new();
    session
        .run(Cursor::new("ceasefire negotiations\nexit\n"), &mut out)
        .unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("ceasefire negotiations"));
    assert!(printed.contains("Summary for Topic A."));
    assert!(printed.contains("Accumulated Answers:"));

    let persisted = fs::read_to_string(side_file).unwrap();
    assert!(persisted.contains("Ceasefire negotiations"));
}

#[test]
fn immediate_exit_prints_empty_accumulation() {
    let tmp = TempDir::new().unwrap();
    let mut session = Session::new(
        settings(&tmp),
        Vec::new(),
        Box::new(EchoModel),
        Box::new(DisambiguatingWiki),
    );

    let mut out = Vec::new();
    session.run(Cursor::new("exit\n"), &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    let after_header = printed.split("Accumulated Answers:").nth(1).unwrap();
    assert!(after_header.trim().is_empty());
}
