//! Similarity ranking of catalog songs against a user profile vector.
//!
//! This crate provides:
//! - `cosine_similarity` with a defined zero for zero-norm vectors
//! - `rank`, a pure top-N ranker over a [`CandidateTable`](catalog::CandidateTable)
//!
//! ## Example Usage
//! ```ignore
//! use ranking::rank;
//!
//! let user_vector = encoder.encode(&profile)?;
//! for hit in rank(&user_vector, &table, 5)? {
//!     println!("{:.3} {} - {}", hit.score, hit.item.title, hit.item.artist);
//! }
//! ```

pub mod error;
pub mod ranker;
pub mod similarity;

// Re-export main types
pub use error::{RankError, Result};
pub use ranker::{RankedCandidate, rank, score_all};
pub use similarity::cosine_similarity;
