use thiserror::Error;

/// Errors from ranking a corpus against a query vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("dimension mismatch: query has {expected} dimensions, corpus item {index} has {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        index: usize,
    },
}

/// Errors from repository operations (used by trait definitions in newschat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from resolving API credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0} is not set; export it in your environment")]
    Missing(String),
}

/// Errors from the news source.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news request failed: {0}")]
    Request(String),

    #[error("news API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("news response could not be parsed: {0}")]
    Deserialization(String),
}
