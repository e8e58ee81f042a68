//! Similarity ranking of a candidate table against a user vector.

use crate::error::{RankError, Result};
use crate::similarity::cosine_similarity;
use catalog::{CandidateItem, CandidateTable};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

/// Tables smaller than this are scored on the calling thread.
const PARALLEL_THRESHOLD: usize = 256;

/// A candidate with its score for one query.
///
/// Borrows the item from the table; the table itself is never touched.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedCandidate<'a> {
    pub item: &'a CandidateItem,
    pub score: f32,
}

/// Score every candidate and return the best `top_n`.
///
/// ## Algorithm
/// 1. Validate `top_n >= 1` and the vector dimension
/// 2. Score each candidate with cosine similarity (in parallel for big tables)
/// 3. Stable sort by score, descending; ties keep table order
/// 4. Truncate to `top_n`
///
/// # Returns
/// * `Ok(Vec<RankedCandidate>)` - `min(top_n, candidates.len())` entries
/// * `Err(RankError)` - If `top_n` is zero or dimensions disagree
///
/// An empty table always ranks to an empty list.
#[instrument(skip(user_vector, candidates), fields(table_len = candidates.len()))]
pub fn rank<'a>(
    user_vector: &[f32],
    candidates: &'a CandidateTable,
    top_n: usize,
) -> Result<Vec<RankedCandidate<'a>>> {
    if top_n == 0 {
        return Err(RankError::InvalidTopN);
    }
    if let Some(table) = candidates.dimension() {
        if table != user_vector.len() {
            return Err(RankError::DimensionMismatch {
                user: user_vector.len(),
                table,
            });
        }
    }

    let mut scored = score_all(user_vector, candidates.items());

    // `sort_by` is stable, which is what keeps tied candidates in table order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);

    debug!(
        "Ranked {} candidates, returning {}",
        candidates.len(),
        scored.len()
    );
    Ok(scored)
}

/// Score every item against `user_vector`, preserving input order.
pub fn score_all<'a>(user_vector: &[f32], items: &'a [CandidateItem]) -> Vec<RankedCandidate<'a>> {
    let score = |item: &'a CandidateItem| RankedCandidate {
        item,
        score: cosine_similarity(user_vector, &item.embedding),
    };

    if items.len() >= PARALLEL_THRESHOLD {
        items.par_iter().map(score).collect()
    } else {
        items.iter().map(score).collect()
    }
}
