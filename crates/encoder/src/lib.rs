//! # Encoder Crate
//!
//! Turns user profiles (and any other text) into embedding vectors.
//!
//! ## Components
//!
//! ### Embedder
//! The blocking `text -> vector` seam. [`HashEmbedder`] is a deterministic
//! local backend; the `embed-client` crate provides a remote one.
//!
//! ### ProfileEncoder
//! Renders a [`UserProfile`] with a fixed template and embeds it once.
//!
//! ## Example Usage
//!
//! ```ignore
//! use encoder::{HashEmbedder, ProfileEncoder, UserProfile};
//!
//! let profile = UserProfile::new(25, vec!["jazz".into()], vec!["Korean".into()])?;
//! let encoder = ProfileEncoder::new(HashEmbedder::new());
//! let vector = encoder.encode(&profile)?;
//! ```

pub mod embedder;
pub mod error;
pub mod profile;
pub mod profile_encoder;

// Re-export commonly used types
pub use embedder::{DEFAULT_DIMENSIONS, Embedder, HashEmbedder};
pub use error::{EncodingError, ProfileError, Result};
pub use profile::{MAX_AGE, MIN_AGE, UserProfile};
pub use profile_encoder::ProfileEncoder;
