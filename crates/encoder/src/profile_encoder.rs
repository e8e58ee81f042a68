//! Profile encoding: render the profile, embed it once.

use crate::embedder::Embedder;
use crate::error::{EncodingError, Result};
use crate::profile::UserProfile;
use tracing::{debug, instrument};

/// Encodes a [`UserProfile`] into the same vector space as catalog moods.
///
/// ## Usage
/// ```ignore
/// let encoder = ProfileEncoder::new(HashEmbedder::new());
/// let vector = encoder.encode(&profile)?;
/// ```
#[derive(Debug, Clone)]
pub struct ProfileEncoder<E> {
    embedder: E,
}

impl<E: Embedder> ProfileEncoder<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    /// Access the underlying embedder, e.g. to embed a catalog with it.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Encode a profile with exactly one embedder call.
    ///
    /// Backend errors are surfaced unchanged; an empty vector from the
    /// backend becomes [`EncodingError::Unavailable`] instead of being handed
    /// to the ranker.
    #[instrument(skip(self, profile), fields(backend = self.embedder.name(), age = profile.age()))]
    pub fn encode(&self, profile: &UserProfile) -> Result<Vec<f32>> {
        let text = profile.describe();
        debug!("Encoding profile text ({} chars)", text.len());

        let vector = self.embedder.embed(&text)?;

        if vector.is_empty() {
            return Err(EncodingError::unavailable(
                self.embedder.name(),
                "backend returned an empty vector",
            ));
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::HashEmbedder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    impl Embedder for CountingEmbedder {
        fn name(&self) -> &str {
            "counting"
        }

        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    struct DownEmbedder;

    impl Embedder for DownEmbedder {
        fn name(&self) -> &str {
            "down"
        }

        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(EncodingError::unavailable("down", "connection refused"))
        }
    }

    struct EmptyEmbedder;

    impl Embedder for EmptyEmbedder {
        fn name(&self) -> &str {
            "empty"
        }

        fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(Vec::new())
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new(30, vec!["jazz".into()], vec!["English".into()]).unwrap()
    }

    #[test]
    fn test_encode_calls_embedder_once() {
        let encoder = ProfileEncoder::new(CountingEmbedder {
            calls: AtomicUsize::new(0),
        });
        let vector = encoder.encode(&profile()).unwrap();

        assert_eq!(encoder.embedder().calls.load(Ordering::SeqCst), 1);
        assert_eq!(vector[0], profile().describe().len() as f32);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = ProfileEncoder::new(HashEmbedder::new());
        assert_eq!(
            encoder.encode(&profile()).unwrap(),
            encoder.encode(&profile()).unwrap()
        );
    }

    #[test]
    fn test_unavailable_backend_propagates() {
        let encoder = ProfileEncoder::new(DownEmbedder);
        let err = encoder.encode(&profile()).unwrap_err();
        assert!(matches!(err, EncodingError::Unavailable { .. }));
    }

    #[test]
    fn test_empty_vector_is_not_returned() {
        let encoder = ProfileEncoder::new(EmptyEmbedder);
        assert!(matches!(
            encoder.encode(&profile()),
            Err(EncodingError::Unavailable { .. })
        ));
    }
}
