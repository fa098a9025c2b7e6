//! Informed search over square tile grids.
//!
//! A [`Solver`] runs A* from an initial [`Board`] to a goal board, moving by
//! swapping adjacent tokens under a [`MoveRule`]. The frontier score is picked
//! by an [`Evaluation`] and estimated by a [`Heuristic`].

pub mod board;
pub mod error;
pub mod evaluation;
pub mod heuristic;
pub mod moves;
pub mod pqueue;
pub mod puzzles;
pub mod solver;
pub mod zobrist;

pub use board::{Board, Category, Direction, Position, Token};
pub use error::{BoardError, ConfigError, PuzzleError};
pub use evaluation::Evaluation;
pub use heuristic::{Heuristic, HeuristicKind, MisplacedTiles, TaxiDistance};
pub use moves::{MoveRule, Swap};
pub use puzzles::{Puzzle, Puzzles};
pub use solver::{
    Cost, Limit, SearchConfig, SearchLimits, SearchStats, SolveResult, Solver, Step,
};
