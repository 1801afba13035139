use crate::index::{DocId, IdfTable, TfTable};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Dense TF-IDF matrix: one row per term, one column per document.
///
/// Terms are kept as a sorted list plus an O(1) lookup map so that the term
/// order of query and document vectors is fixed for the lifetime of one
/// corpus snapshot and identical across rebuilds of the same corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfIdfMatrix {
    terms: Vec<String>,
    lookup: HashMap<String, usize>,
    rows: Vec<Vec<f64>>,
    num_docs: usize,
}

impl TfIdfMatrix {
    /// Combine the TF table and IDF table into per-term weight rows.
    /// Positions with no TF entry stay 0.0; a TF term missing from the IDF
    /// table is skipped (both tables derive from the same index, so this is
    /// a defensive no-op rather than a reportable error).
    pub fn build(tf: &TfTable, idf: &IdfTable, num_docs: usize) -> Self {
        let terms: Vec<String> = idf.keys().cloned().collect();
        let lookup: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(row, term)| (term.clone(), row))
            .collect();
        let mut rows = vec![vec![0.0; num_docs]; terms.len()];
        for (doc_id, tf_doc) in tf.iter().enumerate() {
            for (term, &tf_value) in tf_doc {
                if let Some(&row) = lookup.get(term) {
                    rows[row][doc_id] = tf_value * idf[term];
                }
            }
        }
        Self { terms, lookup, rows, num_docs }
    }

    /// Term order shared by every vector derived from this matrix.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Weight row for a term, or None for out-of-vocabulary terms.
    pub fn row(&self, term: &str) -> Option<&[f64]> {
        self.lookup.get(term).map(|&row| self.rows[row].as_slice())
    }

    /// A document's weight vector, read column-wise in term order.
    pub fn doc_vector(&self, doc_id: DocId) -> Vec<f64> {
        self.rows.iter().map(|row| row[doc_id]).collect()
    }
}

impl Serialize for TfIdfMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.terms.len()))?;
        for (term, row) in self.terms.iter().zip(&self.rows) {
            map.serialize_entry(term, row)?;
        }
        map.end()
    }
}
