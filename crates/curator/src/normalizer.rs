//! Response normalization: raw model text in, one validated JSON object out.

use crate::error::{ParseError, ParseErrorKind};
use crate::extract::{BraceBoundary, ExtractionStrategy, FencedBlock};
use serde_json::Value;
use tracing::debug;

/// Key of the array every normalized object must carry.
pub const RECOMMENDATIONS_KEY: &str = "recommendations";

/// Tries extraction strategies in order until one yields a valid object.
///
/// ## Usage
/// ```ignore
/// let normalizer = ResponseNormalizer::default(); // fenced block, then braces
/// let object = normalizer.normalize(&reply)?;
/// ```
///
/// A strategy "succeeds" only when its span parses as a JSON object with a
/// `recommendations` array. If every strategy fails, the error from the last
/// strategy that found a span is returned, or `NoJsonObject` if none did.
pub struct ResponseNormalizer {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ResponseNormalizer {
    /// Create a normalizer with no strategies; see [`Default`] for the usual chain.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Add a strategy to the end of the chain (builder pattern).
    pub fn add_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Normalize a raw model reply.
    ///
    /// # Returns
    /// * `Ok(Value)` - A JSON object containing a `recommendations` array
    /// * `Err(ParseError)` - With the first 100 characters of `raw`
    pub fn normalize(&self, raw: &str) -> Result<Value, ParseError> {
        let text = raw.trim();
        let mut last_error = None;

        for strategy in &self.strategies {
            let Some(candidate) = strategy.extract(text) else {
                debug!("Strategy {} found no candidate", strategy.name());
                continue;
            };

            match parse_candidate(candidate) {
                Ok(object) => {
                    debug!("Strategy {} produced a valid object", strategy.name());
                    return Ok(object);
                }
                Err(kind) => {
                    debug!("Strategy {} candidate rejected: {}", strategy.name(), kind);
                    last_error = Some(kind);
                }
            }
        }

        Err(ParseError::new(
            last_error.unwrap_or(ParseErrorKind::NoJsonObject),
            raw,
        ))
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new()
            .add_strategy(FencedBlock)
            .add_strategy(BraceBoundary)
    }
}

/// Normalize with the default strategy chain.
pub fn normalize(raw: &str) -> Result<Value, ParseError> {
    ResponseNormalizer::default().normalize(raw)
}

fn parse_candidate(candidate: &str) -> Result<Value, ParseErrorKind> {
    let value: Value = serde_json::from_str(candidate).map_err(|e| ParseErrorKind::Malformed {
        reason: e.to_string(),
    })?;

    let Some(object) = value.as_object() else {
        return Err(ParseErrorKind::SchemaMismatch {
            reason: "top-level value is not an object".to_string(),
        });
    };

    match object.get(RECOMMENDATIONS_KEY) {
        Some(Value::Array(_)) => Ok(value),
        Some(_) => Err(ParseErrorKind::SchemaMismatch {
            reason: format!("'{RECOMMENDATIONS_KEY}' is not an array"),
        }),
        None => Err(ParseErrorKind::SchemaMismatch {
            reason: format!("missing '{RECOMMENDATIONS_KEY}' array"),
        }),
    }
}
