use crate::corpus::CorpusState;
use crate::error::{EngineError, Result};
use crate::index::DocId;
use crate::tokenizer::normalize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

/// Vector-comparison metric used to rank documents against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Normalized dot product; higher is more similar.
    Cosine,
    /// Straight-line distance; lower is more similar.
    Euclidean,
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(EngineError::InvalidMetric(other.to_string())),
        }
    }
}

/// One ranked result: the document, its score under the chosen metric, and
/// its original text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f64,
    pub content: String,
}

/// Cosine similarity between two equal-length vectors. Defined as 0.0 when
/// either magnitude is zero, so empty queries and empty documents never
/// divide by zero and simply score nothing.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

/// Euclidean distance between two equal-length vectors.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Rank every document in the corpus against a free-text query.
///
/// The query is projected into the corpus's term space: out-of-vocabulary
/// query terms contribute zero weight and never extend the space. Results
/// are sorted best-first for the chosen metric; ties keep ascending
/// document-id order (the sort is stable).
pub fn search(query: &str, metric: Metric, corpus: &CorpusState) -> Result<Vec<SearchHit>> {
    if corpus.is_empty() {
        return Err(EngineError::NotReady);
    }

    let mut counts: HashMap<String, u64> = HashMap::new();
    for term in normalize(query) {
        *counts.entry(term).or_insert(0) += 1;
    }
    // Max frequency defaults to 1 so a query with no surviving tokens yields
    // an all-zero vector instead of dividing by zero.
    let max_freq = counts.values().copied().max().unwrap_or(1) as f64;

    let query_vec: Vec<f64> = corpus
        .tfidf
        .terms()
        .iter()
        .map(|term| {
            let tf = counts.get(term).map_or(0.0, |&c| c as f64 / max_freq);
            // Missing IDF entries default to zero weight.
            let idf = corpus.idf.get(term).copied().unwrap_or(0.0);
            tf * idf
        })
        .collect();

    let mut hits: Vec<SearchHit> = (0..corpus.num_docs())
        .map(|doc_id| {
            let doc_vec = corpus.tfidf.doc_vector(doc_id);
            let score = match metric {
                Metric::Cosine => cosine_similarity(&query_vec, &doc_vec),
                Metric::Euclidean => euclidean_distance(&query_vec, &doc_vec),
            };
            SearchHit {
                doc_id,
                score,
                content: corpus.documents[doc_id].clone(),
            }
        })
        .collect();

    match metric {
        Metric::Cosine => {
            hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
        }
        Metric::Euclidean => {
            hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
        }
    }

    tracing::debug!(metric = ?metric, hits = hits.len(), "query scored");
    Ok(hits)
}
