use std::io;

use thiserror::Error;

/// Errors raised while building a board from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must be at least {min}x{min}, got {size}x{size}")]
    TooSmall { size: usize, min: usize },
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error("invalid token '{0}'")]
    InvalidToken(String),
}

/// Errors raised while configuring a search. All of them are detected before
/// the first expansion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid heuristic selector {0} (expected 1 or 2)")]
    InvalidHeuristic(u8),
    #[error("invalid evaluation selector {0} (expected 1, 2 or 3)")]
    InvalidEvaluation(u8),
    #[error("initial board is {initial}x{initial} but goal board is {goal}x{goal}")]
    DimensionMismatch { initial: usize, goal: usize },
    #[error("blank-swap rule needs exactly one blank, found {0}")]
    BlankCount(usize),
}

/// Errors raised while loading puzzle files.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid puzzle: {0}")]
    InvalidPuzzle(String),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
