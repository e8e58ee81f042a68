//! Server crate for the SongScout recommendation engine.
//!
//! This crate wires the library crates into the two recommendation paths:
//! - `ContentRecommender`: profile embedding ranked against the song catalog
//! - `CurationService`: prompt rendering and reply interpretation for the
//!   language-model path
//!
//! plus `RecommendationLog`, a caller-owned history of past batches.

pub mod curation;
pub mod history;
pub mod recommender;

pub use curation::CurationService;
pub use history::RecommendationLog;
pub use recommender::{ContentRecommender, SongRecommendation};
