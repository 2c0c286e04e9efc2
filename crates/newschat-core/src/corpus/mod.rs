//! Corpus construction: fetch articles for a keyword and embed their titles.

pub mod builder;
pub mod source;
