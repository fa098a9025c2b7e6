use std::collections::HashMap;

use crate::board::{Board, Position, Token};
use crate::error::ConfigError;

/// Trait for estimating the number of swaps needed to reach the goal.
///
/// Implementations are pure functions of the board and a goal fixed at
/// construction, and return 0 exactly on the goal.
pub trait Heuristic {
    fn estimate(&self, board: &Board) -> usize;
}

/// Selects one of the built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicKind {
    Misplaced,
    #[default]
    Taxi,
}

/// Selector values as used in puzzle files: 1 = misplaced, 2 = taxi distance.
impl TryFrom<u8> for HeuristicKind {
    type Error = ConfigError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(HeuristicKind::Misplaced),
            2 => Ok(HeuristicKind::Taxi),
            _ => Err(ConfigError::InvalidHeuristic(selector)),
        }
    }
}

/// Counts cells whose token differs from the goal.
pub struct MisplacedTiles {
    goal: Board,
}

impl MisplacedTiles {
    pub fn new(goal: &Board) -> Self {
        MisplacedTiles { goal: goal.clone() }
    }
}

impl Heuristic for MisplacedTiles {
    fn estimate(&self, board: &Board) -> usize {
        board
            .cells()
            .iter()
            .zip(self.goal.cells())
            .filter(|(cell, goal)| cell != goal)
            .count()
    }
}

/// Sums Manhattan distances from each misplaced token to that token's first
/// occurrence (row-major) in the goal.
pub struct TaxiDistance {
    goal: Board,
    /// targets[token] = first position of `token` in the goal
    targets: HashMap<Token, Position>,
}

impl TaxiDistance {
    pub fn new(goal: &Board) -> Self {
        let mut targets = HashMap::new();
        for (row, tokens) in goal.rows().enumerate() {
            for (col, &token) in tokens.iter().enumerate() {
                targets.entry(token).or_insert(Position::new(row, col));
            }
        }
        TaxiDistance {
            goal: goal.clone(),
            targets,
        }
    }
}

impl Heuristic for TaxiDistance {
    fn estimate(&self, board: &Board) -> usize {
        let mut total = 0;
        for (row, (tokens, goal_tokens)) in board.rows().zip(self.goal.rows()).enumerate() {
            for (col, (&token, &goal_token)) in tokens.iter().zip(goal_tokens).enumerate() {
                if token == goal_token {
                    continue;
                }
                // A token missing from the goal still needs at least one move.
                total += match self.targets.get(&token) {
                    Some(target) => target.row.abs_diff(row) + target.col.abs_diff(col),
                    None => 1,
                };
            }
        }
        total
    }
}
