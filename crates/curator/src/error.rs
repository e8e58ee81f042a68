//! Error types for the curator crate.

use thiserror::Error;

/// How many characters of the raw reply are kept for diagnostics.
pub const SNIPPET_CHARS: usize = 100;

/// Why a model reply could not be turned into a recommendation object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Neither a fenced block nor a `{ ... }` span was found
    #[error("no JSON object found")]
    NoJsonObject,

    /// A candidate span was found but is not valid JSON
    #[error("malformed JSON: {reason}")]
    Malformed { reason: String },

    /// Valid JSON, but not an object with a `recommendations` array
    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },
}

/// A model reply that could not be normalized.
///
/// Carries the first [`SNIPPET_CHARS`] characters of the raw text so the
/// caller can show or log what the model actually said.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (raw: {snippet:?})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub snippet: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, raw: &str) -> Self {
        Self {
            kind,
            snippet: truncate_chars(raw.trim(), SNIPPET_CHARS),
        }
    }

    /// `SchemaMismatch` is reported as a parse error, but callers may want to
    /// tell it apart.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self.kind, ParseErrorKind::SchemaMismatch { .. })
    }
}

/// Errors raised while rendering a prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Age must be between {min} and {max}, got {age}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },

    #[error("Song count must be at least 1")]
    InvalidCount,

    #[error("Failed to read prompt template {path}: {source}")]
    TemplateIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Truncate to `max` characters on a char boundary, appending "…" if cut.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{truncated}…")
    }
}
