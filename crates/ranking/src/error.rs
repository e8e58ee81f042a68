//! Error types for the ranking crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// `top_n` must be at least one
    #[error("top_n must be at least 1")]
    InvalidTopN,

    /// The user vector and the table come from different embedding spaces
    #[error("User vector has {user} dimensions but the candidate table uses {table}")]
    DimensionMismatch { user: usize, table: usize },
}

pub type Result<T> = std::result::Result<T, RankError>;
