//! In-memory TF-IDF retrieval: text normalization, inverted-index and
//! frequency tables, and cosine/Euclidean ranking over one corpus snapshot.

pub mod corpus;
pub mod error;
pub mod index;
pub mod matrix;
pub mod search;
pub mod tokenizer;

pub use corpus::CorpusState;
pub use error::{EngineError, Result};
pub use index::DocId;
pub use matrix::TfIdfMatrix;
pub use search::{search, Metric, SearchHit};
