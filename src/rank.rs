//! BM25 lexical relevance ranking.
//!
//! Scores the keyword-filtered corpus against a user query with Okapi BM25
//! (k1 = 1.2, b = 0.75) and returns the top-N articles. The index is
//! rebuilt on every query; the corpus is small enough that persisting it
//! across queries is not worth the bookkeeping.

use std::collections::HashMap;

const K1: f64 = 1.2;
const B: f64 = 0.75;

/// Floor for per-term IDF so that terms appearing in most documents do not
/// score negatively.
const IDF_EPSILON: f64 = 1e-6;

/// Lowercase word-level tokenization: alphanumeric/underscore runs, all
/// other characters treated as separators.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Okapi BM25 index over a tokenized corpus.
pub struct Bm25Index {
    term_freqs: Vec<HashMap<String, usize>>,
    doc_lens: Vec<usize>,
    avg_doc_len: f64,
    idf: HashMap<String, f64>,
}

impl Bm25Index {
    /// Build the index from tokenized documents.
    pub fn fit(docs: &[Vec<String>]) -> Self {
        let doc_lens: Vec<usize> = docs.iter().map(Vec::len).collect();
        let total_len: usize = doc_lens.iter().sum();
        let avg_doc_len = if docs.is_empty() {
            0.0
        } else {
            total_len as f64 / docs.len() as f64
        };

        let mut term_freqs = Vec::with_capacity(docs.len());
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();
        for doc in docs {
            let mut tf: HashMap<String, usize> = HashMap::new();
            for term in doc {
                *tf.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(tf);
        }

        let n = docs.len() as f64;
        let idf = doc_freqs
            .into_iter()
            .map(|(term, df)| {
                let df = df as f64;
                let value = ((n - df + 0.5) / (df + 0.5)).ln();
                (term, value.max(IDF_EPSILON))
            })
            .collect();

        Self {
            term_freqs,
            doc_lens,
            avg_doc_len,
            idf,
        }
    }

    /// BM25 score of one document against a tokenized query.
    pub fn score(&self, query: &[String], doc: usize) -> f64 {
        let tf = &self.term_freqs[doc];
        let len_norm = if self.avg_doc_len > 0.0 {
            self.doc_lens[doc] as f64 / self.avg_doc_len
        } else {
            0.0
        };

        query
            .iter()
            .map(|term| {
                let freq = tf.get(term).copied().unwrap_or(0) as f64;
                if freq == 0.0 {
                    return 0.0;
                }
                let idf = self.idf.get(term).copied().unwrap_or(0.0);
                idf * (freq * (K1 + 1.0)) / (freq + K1 * (1.0 - B + B * len_norm))
            })
            .sum()
    }
}

/// Rank articles against a query and return the top `top_n` original
/// (untokenized) texts, descending by score, ties stable on corpus order.
pub fn rank_articles(query: &str, articles: &[String], top_n: usize) -> Vec<String> {
    if articles.is_empty() {
        return Vec::new();
    }

    let tokenized_query = tokenize(query);
    if tokenized_query.is_empty() {
        return Vec::new();
    }

    let tokenized_docs: Vec<Vec<String>> = articles.iter().map(|a| tokenize(a)).collect();
    let index = Bm25Index::fit(&tokenized_docs);

    let mut scored: Vec<(usize, f64)> = (0..articles.len())
        .map(|i| (i, index.score(&tokenized_query, i)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let top: Vec<String> = scored
        .into_iter()
        .take(top_n)
        .map(|(i, _)| articles[i].clone())
        .collect();

    tracing::info!("Retrieved {} relevant articles for the query", top.len());
    top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("The War-Room, 2023!"),
            vec!["the", "war", "room", "2023"]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("...!?").is_empty());
    }

    #[test]
    fn test_most_relevant_article_first() {
        let articles = corpus(&[
            "the city council discussed parking rules",
            "heavy fighting broke out as the war escalated near the border",
            "a new cafe opened downtown",
        ]);
        let top = rank_articles("war fighting border", &articles, 10);
        assert_eq!(top[0], articles[1]);
    }

    #[test]
    fn test_result_count_capped_by_top_n() {
        let articles: Vec<String> = (0..25).map(|i| format!("war report number {i}")).collect();
        let top = rank_articles("war report", &articles, 10);
        assert_eq!(top.len(), 10);
    }

    #[test]
    fn test_result_count_capped_by_corpus_size() {
        let articles = corpus(&["war in the east", "war in the west"]);
        let top = rank_articles("war", &articles, 10);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_results_are_corpus_members() {
        let articles = corpus(&["war reporting", "peace talks", "war crimes tribunal"]);
        let top = rank_articles("war", &articles, 10);
        for result in &top {
            assert!(articles.contains(result));
        }
    }

    #[test]
    fn test_empty_corpus_yields_empty() {
        let top = rank_articles("war", &[], 10);
        assert!(top.is_empty());
    }

    #[test]
    fn test_empty_query_yields_empty() {
        let articles = corpus(&["war in the east"]);
        assert!(rank_articles("", &articles, 10).is_empty());
        assert!(rank_articles("?!", &articles, 10).is_empty());
    }

    #[test]
    fn test_ties_stable_on_corpus_order() {
        let articles = corpus(&["war alpha", "war alpha", "war alpha"]);
        let top = rank_articles("war", &articles, 3);
        assert_eq!(top, articles);
    }

    #[test]
    fn test_idf_never_negative() {
        // "war" appears in every document; a raw Okapi IDF would go negative.
        let docs: Vec<Vec<String>> = (0..4).map(|i| tokenize(&format!("war zone {i}"))).collect();
        let index = Bm25Index::fit(&docs);
        let score = index.score(&tokenize("war"), 0);
        assert!(score >= 0.0);
    }
}
