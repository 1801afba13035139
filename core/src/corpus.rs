use crate::index::{build_index, compute_idf, compute_tf, IdfTable, InvertedIndex, TfTable};
use crate::matrix::TfIdfMatrix;
use serde::Serialize;

/// One fully-indexed corpus: the documents plus every derived structure.
///
/// A build produces the whole bundle at once and callers replace their
/// previous state wholesale; nothing here is mutated after construction, so
/// concurrent readers only need a shared reference to the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusState {
    pub documents: Vec<String>,
    pub index: InvertedIndex,
    pub tf: TfTable,
    pub idf: IdfTable,
    pub tfidf: TfIdfMatrix,
}

impl CorpusState {
    /// Index a document set: normalize, build the inverted index, compute TF
    /// and IDF, and combine them into the TF-IDF matrix.
    pub fn build(documents: Vec<String>) -> Self {
        let total_docs = documents.len();
        let index = build_index(&documents);
        let tf = compute_tf(&documents);
        let idf = compute_idf(&index, total_docs);
        let tfidf = TfIdfMatrix::build(&tf, &idf, total_docs);
        tracing::info!(
            num_docs = total_docs,
            num_terms = index.len(),
            "corpus indexed"
        );
        Self { documents, index, tf, idf, tfidf }
    }

    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    /// A corpus with zero documents is not queryable.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
