//! Error types for the catalog crate.
//!
//! Loading is all-or-nothing: any of these errors aborts the load so that
//! schema problems surface at startup rather than per query.

use encoder::EncodingError;
use thiserror::Error;

/// Errors that can occur while loading or embedding the song catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file has no header row at all
    #[error("Catalog {file} is empty, expected a header row")]
    EmptyFile { file: String },

    /// A required column is absent from the header
    #[error("Catalog {file} is missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// A row could not be split into fields (e.g. an unterminated quote)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Row width doesn't match the header width
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Embedding a mood description failed
    #[error("Failed to embed mood for song {id}: {source}")]
    Embedding {
        id: u32,
        #[source]
        source: EncodingError,
    },

    /// Embeddings of different lengths ended up in one table
    #[error("Song {id} has a {found}-dimensional embedding, table uses {expected}")]
    InconsistentDimension {
        id: u32,
        expected: usize,
        found: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
