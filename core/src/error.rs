use thiserror::Error;

/// Failures surfaced by the retrieval engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Search or inspection attempted before any corpus was indexed, or
    /// against a corpus with zero documents.
    #[error("no documents indexed yet")]
    NotReady,

    /// The caller asked for a distance metric the engine does not support.
    #[error("unsupported metric: {0}")]
    InvalidMetric(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
