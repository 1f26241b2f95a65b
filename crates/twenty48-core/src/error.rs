//! Errors raised when a caller hands the engine a board it cannot accept.

use thiserror::Error;

/// Reasons a seeded board is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Wrong number of rows, or a row that is not 4 cells long.
    ///
    /// `row`/`len` are set when a single row has the wrong length.
    #[error("invalid board shape: expected 4x4, got {rows} rows{}", fmt_row(.row, .len))]
    InvalidBoardShape {
        rows: usize,
        row: Option<usize>,
        len: Option<usize>,
    },

    /// A cell that is neither 0 nor a power of two in `2..=MAX_TILE`.
    #[error("invalid tile value {value} at ({row}, {col})")]
    InvalidTileValue { row: usize, col: usize, value: i64 },
}

fn fmt_row(row: &Option<usize>, len: &Option<usize>) -> String {
    match (row, len) {
        (Some(r), Some(l)) => format!(" (row {r} has {l} cells)"),
        _ => String::new(),
    }
}
