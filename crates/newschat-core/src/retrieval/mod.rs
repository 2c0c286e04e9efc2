//! Similarity search over the embedded article corpus.
//!
//! - `VectorStore`: the in-memory corpus, loaded once per process
//! - `ranker`: dot-product scoring with a stable descending sort
//! - `Embedder`: port trait for the text-to-vector service

pub mod embedder;
pub mod ranker;
pub mod store;
