//! Structured error types for board construction and the grid codec.
//!
//! Illegal moves are deliberately NOT represented here: a swap that is
//! non-adjacent or produces no match is a normal outcome, signaled by a
//! zero-point return with the grid left untouched.

/// Errors surfaced by board construction and grid encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("board shape {rows}x{cols} is below the {min}x{min} minimum")]
    InvalidShape {
        rows: usize,
        cols: usize,
        min: usize,
    },

    #[error("encoded grid is missing the '<ncols> <letters>' separator")]
    EmptyEncoding,

    #[error("encoded grid has a bad column count: {0:?}")]
    BadDimension(String),

    #[error("encoded grid has {cells} cells, not a positive multiple of {cols} columns")]
    RaggedEncoding { cells: usize, cols: usize },

    #[error("encoded grid contains {0:?}, expected 'A'..='Z'")]
    BadCell(char),

    #[error("tile value {0} is outside the 1..=26 letter-encodable range")]
    ValueOverflow(u8),
}
