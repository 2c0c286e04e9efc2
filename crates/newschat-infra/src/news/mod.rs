//! News source implementations.

pub mod world_news;

pub use world_news::{NewsQuery, WorldNewsClient};
