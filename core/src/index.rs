use crate::tokenizer::normalize;
use std::collections::BTreeMap;

/// Zero-based document id, assigned by insertion order within one build.
pub type DocId = usize;

/// Term to sorted, duplicate-free posting list of the documents containing it.
pub type InvertedIndex = BTreeMap<String, Vec<DocId>>;

/// One max-frequency-normalized term-frequency table per document.
pub type TfTable = Vec<BTreeMap<String, f64>>;

/// Term to log2(N / document frequency).
pub type IdfTable = BTreeMap<String, f64>;

/// Build the inverted index over the documents in input order. Posting lists
/// come out sorted ascending because documents are walked in id order; a term
/// never maps to an empty list.
pub fn build_index(documents: &[String]) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (doc_id, text) in documents.iter().enumerate() {
        for term in normalize(text) {
            let postings = index.entry(term).or_insert_with(Vec::new);
            // Documents arrive in ascending id order, so dedup against the tail.
            if postings.last() != Some(&doc_id) {
                postings.push(doc_id);
            }
        }
    }
    index
}

/// Per-document term frequencies, each raw count divided by the maximum raw
/// count in that document. A document with no surviving tokens yields an
/// empty table rather than an error.
pub fn compute_tf(documents: &[String]) -> TfTable {
    documents
        .iter()
        .map(|text| {
            let mut counts: BTreeMap<String, u64> = BTreeMap::new();
            for term in normalize(text) {
                *counts.entry(term).or_insert(0) += 1;
            }
            let max_freq = counts.values().copied().max().unwrap_or(0) as f64;
            counts
                .into_iter()
                .map(|(term, count)| (term, count as f64 / max_freq))
                .collect()
        })
        .collect()
}

/// Inverse document frequency for every term in the index. Posting lists are
/// never empty, so the ratio is always well defined; an index over zero
/// documents produces an empty table.
pub fn compute_idf(index: &InvertedIndex, total_docs: usize) -> IdfTable {
    index
        .iter()
        .map(|(term, postings)| {
            let idf = (total_docs as f64 / postings.len() as f64).log2();
            (term.clone(), idf)
        })
        .collect()
}
