//! Errors raised by the grid engine

use thiserror::Error;

use super::direction::Direction;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No legal move towards {0}")]
    IllegalMove(Direction),

    #[error("Grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("Grid has no cells")]
    EmptyGrid,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cell ({row}, {col}) holds {value}, expected 0-9")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("Position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
