use std::fmt;

use crate::board::{Board, Direction, Position, Token};

/// Exchange of the tokens in two edge-adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub from: Position,
    pub to: Position,
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}

/// Which adjacent swaps are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRule {
    /// The single blank trades places with any neighbour.
    Blank,
    /// Any two neighbours of different categories trade places.
    Typed,
}

impl MoveRule {
    /// `Typed` if the board holds any marker token, `Blank` otherwise.
    pub fn detect(board: &Board) -> Self {
        if board.cells().iter().any(|token| token.is_marker()) {
            MoveRule::Typed
        } else {
            MoveRule::Blank
        }
    }

    /// Collect every legal swap on `board` into `out`, replacing its contents.
    ///
    /// Each physical swap is listed once: the blank rule walks the blank's
    /// neighbours up, down, right, left; the typed rule only pairs a cell
    /// with the cells below and to the right of it.
    pub fn swaps(&self, board: &Board, out: &mut Vec<Swap>) {
        out.clear();
        match self {
            MoveRule::Blank => {
                let Some(blank) = board.find(Token::BLANK) else {
                    return;
                };
                out.extend(
                    board
                        .neighbors(blank)
                        .into_iter()
                        .map(|to| Swap { from: blank, to }),
                );
            }
            MoveRule::Typed => {
                for row in 0..board.size() {
                    for col in 0..board.size() {
                        let from = Position::new(row, col);
                        for dir in [Direction::Right, Direction::Down] {
                            if let Some(to) = board.neighbor(from, dir) {
                                let swap = Swap { from, to };
                                if self.is_legal(board, swap) {
                                    out.push(swap);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Whether `swap` is allowed on `board` under this rule.
    pub fn is_legal(&self, board: &Board, swap: Swap) -> bool {
        let size = board.size();
        let in_bounds = |pos: Position| pos.row < size && pos.col < size;
        let distance = swap.from.row.abs_diff(swap.to.row) + swap.from.col.abs_diff(swap.to.col);
        if distance != 1 || !in_bounds(swap.from) || !in_bounds(swap.to) {
            return false;
        }

        let a = board.get(swap.from);
        let b = board.get(swap.to);
        match self {
            MoveRule::Blank => (a == Token::BLANK) != (b == Token::BLANK),
            MoveRule::Typed => a.category() != b.category(),
        }
    }
}
