//! Dot-product ranking of corpus items against a query vector.
//!
//! Vectors from the embedding service are unit length, so the dot product
//! equals cosine similarity without the normalization cost. Scores are not
//! re-normalized here.

use std::cmp::Ordering;

use newschat_types::article::{EmbeddedArticle, RankedArticle};
use newschat_types::error::RankError;

/// Dot product of two equal-length vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Score every corpus item against `query` and order by descending score.
///
/// Items with equal scores keep their corpus order. NaN scores sort last.
///
/// # Errors
///
/// Returns [`RankError::DimensionMismatch`] if any item vector's length
/// differs from the query's.
pub fn rank<'a>(
    query: &[f32],
    corpus: &'a [EmbeddedArticle],
) -> Result<Vec<RankedArticle<'a>>, RankError> {
    let mut ranked = corpus
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let vector = item.vector();
            if vector.len() != query.len() {
                return Err(RankError::DimensionMismatch {
                    expected: query.len(),
                    actual: vector.len(),
                    index,
                });
            }
            Ok(RankedArticle {
                item,
                score: dot_product(query, vector),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // slice::sort_by is stable
    ranked.sort_by(|a, b| descending(a.score, b.score));
    Ok(ranked)
}

/// Total order on scores: larger first, NaN after every number.
fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
