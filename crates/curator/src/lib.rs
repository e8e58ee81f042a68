//! Curated (LLM) recommendation path: prompt out, reply in.
//!
//! This crate provides:
//! - `PromptTemplate` for rendering the recommendation request
//! - `ResponseNormalizer` for pulling one JSON object out of a free-form reply
//! - `Recommendation` parsing with per-item placeholder substitution
//! - Search links and the `VideoResolver` seam
//!
//! Calling the model itself is left to the caller; this crate only deals with
//! the text going in and coming out.
//!
//! ## Example Usage
//! ```ignore
//! use curator::{curate, parse_recommendations, PromptRequest, PromptTemplate, SearchLinkResolver};
//!
//! let prompt = PromptTemplate::default().render(&PromptRequest::new(25, "jazz", Some("Korean")))?;
//! let reply = call_your_model(&prompt)?;
//! for item in curate(parse_recommendations(&reply)?, &SearchLinkResolver) {
//!     println!("{}. {} - {}", item.rank, item.recommendation.title, item.recommendation.artist);
//! }
//! ```

pub mod error;
pub mod extract;
pub mod links;
pub mod normalizer;
pub mod prompt;
pub mod recommendation;

// Re-export main types
pub use error::{ParseError, ParseErrorKind, PromptError};
pub use extract::{BraceBoundary, ExtractionStrategy, FencedBlock};
pub use links::{CuratedRecommendation, SearchLinkResolver, VideoResolver, curate, search_link};
pub use normalizer::{ResponseNormalizer, normalize};
pub use prompt::{DEFAULT_GENRE, DEFAULT_SONG_COUNT, PromptRequest, PromptTemplate};
pub use recommendation::{
    ARTIST_PLACEHOLDER, REASON_PLACEHOLDER, Recommendation, TITLE_PLACEHOLDER,
    parse_recommendations, recommendations_from_object,
};
