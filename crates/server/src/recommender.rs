//! # Content Recommender
//!
//! Coordinates the content-based path:
//! 1. Encode the user profile
//! 2. Rank the candidate table by cosine similarity
//! 3. Convert the top N into display-ready recommendations
//!
//! The candidate table is loaded once and shared behind an `Arc`; every
//! call is independent and leaves it untouched.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument};

use catalog::{CandidateTable, SongId};
use encoder::{Embedder, ProfileEncoder, UserProfile};
use ranking::RankedCandidate;

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub song_id: SongId,
    pub title: String,
    pub artist: String,
    pub mood: String,
    pub score: f32,
    pub explanation: String,
}

impl SongRecommendation {
    fn from_ranked(rank: usize, hit: &RankedCandidate<'_>) -> Self {
        Self {
            rank,
            song_id: hit.item.id,
            title: hit.item.title.clone(),
            artist: hit.item.artist.clone(),
            mood: hit.item.mood.clone(),
            score: hit.score,
            explanation: format!(
                "Mood '{}' matches your profile with similarity {:.3}",
                hit.item.mood, hit.score
            ),
        }
    }
}

/// Main recommender that ties encoder, catalog and ranker together
pub struct ContentRecommender<E> {
    table: Arc<CandidateTable>,
    encoder: ProfileEncoder<E>,
}

impl<E: Embedder> ContentRecommender<E> {
    /// Wrap an already-built table.
    ///
    /// The table must have been embedded with the same backend as `embedder`;
    /// mixing models makes the scores meaningless.
    pub fn new(table: Arc<CandidateTable>, embedder: E) -> Self {
        Self {
            table,
            encoder: ProfileEncoder::new(embedder),
        }
    }

    /// Load the catalog at `path` with `embedder` and wrap it.
    pub fn load(path: &Path, embedder: E) -> Result<Self> {
        let table = CandidateTable::load_from_file(path, &embedder)
            .with_context(|| format!("Failed to load song catalog from {}", path.display()))?;
        Ok(Self::new(Arc::new(table), embedder))
    }

    /// Shared handle to the candidate table.
    pub fn table(&self) -> &Arc<CandidateTable> {
        &self.table
    }

    /// Main entry point: Get recommendations for a profile
    ///
    /// # Arguments
    /// * `profile` - The listener profile
    /// * `limit` - Number of recommendations to return (at least 1)
    ///
    /// # Returns
    /// Up to `limit` recommendations sorted by score (highest first)
    #[instrument(skip(self, profile), fields(age = profile.age()))]
    pub fn recommend(&self, profile: &UserProfile, limit: usize) -> Result<Vec<SongRecommendation>> {
        let start_time = Instant::now();

        let user_vector = self
            .encoder
            .encode(profile)
            .context("Failed to encode user profile")?;

        let ranked = ranking::rank(&user_vector, &self.table, limit)
            .context("Failed to rank candidates")?;

        let recommendations: Vec<SongRecommendation> = ranked
            .iter()
            .enumerate()
            .map(|(i, hit)| SongRecommendation::from_ranked(i + 1, hit))
            .collect();

        info!(
            "Selected {} of {} songs in {:.2?}",
            recommendations.len(),
            self.table.len(),
            start_time.elapsed()
        );
        Ok(recommendations)
    }
}
