//! The embedding seam and a local, deterministic backend.
//!
//! Everything that needs vectors (profile encoding, catalog loading) goes
//! through the [`Embedder`] trait so the backend can be swapped between the
//! offline [`HashEmbedder`] and a remote sentence-embedding service.

use crate::error::Result;

/// Default vector length for [`HashEmbedder`]; matches the MiniLM sentence model.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Turns a piece of text into a fixed-length vector.
///
/// ## Design Note
/// - `Send + Sync` so one embedder can serve rayon workers during catalog load
/// - The call is blocking; callers decide whether to offload it
/// - Every vector produced by one embedder must have the same length
pub trait Embedder: Send + Sync {
    /// Returns the name of this backend (for logging/errors)
    fn name(&self) -> &str;

    /// Embed a single piece of text.
    ///
    /// # Returns
    /// * `Ok(Vec<f32>)` - The embedding vector
    /// * `Err(EncodingError::Unavailable)` - If the backend failed
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

/// Feature-hashing embedder that needs no model files or network.
///
/// ## Algorithm
/// 1. Split text into lowercase alphanumeric tokens (2+ chars)
/// 2. Hash each token with FNV-1a into one of `dimensions` buckets
/// 3. Add `1 + ln(token_len)` to that bucket
/// 4. L2-normalize the result
///
/// Texts sharing vocabulary land close together, which is enough for
/// offline runs and tests. Empty input yields the zero vector.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create a new HashEmbedder with [`DEFAULT_DIMENSIONS`].
    pub fn new() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Configure the vector length (default: 384). Zero is bumped to one.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions.max(1);
        self
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn push_token(&self, vector: &mut [f32], token: &mut String) {
        if token.chars().count() < 2 {
            token.clear();
            return;
        }
        let weight = 1.0 + (token.chars().count() as f32).ln();
        let idx = (fnv1a_hash(token.as_bytes()) % self.dimensions as u64) as usize;
        vector[idx] += weight;
        token.clear();
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0_f32; self.dimensions];

        let mut token = String::with_capacity(24);
        for ch in text.chars() {
            if ch.is_alphanumeric() {
                token.extend(ch.to_lowercase());
            } else {
                self.push_token(&mut vector, &mut token);
            }
        }
        self.push_token(&mut vector, &mut token);

        normalize_in_place(&mut vector);
        Ok(vector)
    }
}

fn normalize_in_place(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

fn fnv1a_hash(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf29ce484222325_u64;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x00000100000001b3_u64);
    }
    hash
}
