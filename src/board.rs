use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;

use crate::error::BoardError;

/// Smallest supported board edge.
pub const MIN_SIZE: usize = 2;

/// A single cell value.
///
/// Variant order is significant: numbers sort ascending before every `Red`,
/// and every `Red` sorts before every `Green`. Sorting a board's tokens in
/// this order produces the canonical goal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Num(u16),
    Red,
    Green,
}

impl Token {
    /// The empty slot moved around by the blank-swap rule.
    pub const BLANK: Token = Token::Num(0);

    pub fn category(self) -> Category {
        match self {
            Token::Num(_) => Category::Numeric,
            Token::Red => Category::Red,
            Token::Green => Category::Green,
        }
    }

    pub fn is_marker(self) -> bool {
        self.category() != Category::Numeric
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => f.pad(&n.to_string()),
            Token::Red => f.pad("R"),
            Token::Green => f.pad("G"),
        }
    }
}

impl FromStr for Token {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "r" => Ok(Token::Red),
            "G" | "g" => Ok(Token::Green),
            _ => s
                .parse::<u16>()
                .map(Token::Num)
                .map_err(|_| BoardError::InvalidToken(s.to_string())),
        }
    }
}

/// Broad token class governing swap legality under the typed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Numeric,
    Red,
    Green,
}

impl Category {
    pub fn of(token: Token) -> Self {
        token.category()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Neighbour order used for move generation: up, down, right, left.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
];

impl Direction {
    fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// An `n x n` grid snapshot.
///
/// Equality and hashing cover the cells only; search bookkeeping (path cost,
/// heuristic, predecessor) lives in the solver's arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Box<[Token]>,
}

impl Board {
    /// Build a board from rows, copying every token.
    pub fn new<R: AsRef<[Token]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < MIN_SIZE {
            return Err(BoardError::TooSmall {
                size,
                min: MIN_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, tokens) in rows.iter().enumerate() {
            let tokens = tokens.as_ref();
            if tokens.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: tokens.len(),
                    size,
                });
            }
            cells.extend_from_slice(tokens);
        }

        Ok(Board {
            size,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Build a board from row-major cells.
    pub fn from_cells(size: usize, cells: Vec<Token>) -> Result<Self, BoardError> {
        if size < MIN_SIZE {
            return Err(BoardError::TooSmall {
                size,
                min: MIN_SIZE,
            });
        }
        if cells.len() != size * size {
            return Err(BoardError::CellCount {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Board {
            size,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Parse a board with one row per line and whitespace-separated tokens.
    ///
    /// Tokens:
    /// - decimal integers, `0` being the blank
    /// - `R` = red marker
    /// - `G` = green marker
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(Token::from_str)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&rows)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Token] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Token]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn get(&self, pos: Position) -> Token {
        self.cells[self.index(pos)]
    }

    pub(crate) fn index(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.size && pos.col < self.size);
        pos.row * self.size + pos.col
    }

    /// First occurrence of `token` in row-major order.
    pub fn find(&self, token: Token) -> Option<Position> {
        self.cells
            .iter()
            .position(|&cell| cell == token)
            .map(|idx| Position::new(idx / self.size, idx % self.size))
    }

    pub fn count(&self, token: Token) -> usize {
        self.cells.iter().filter(|&&cell| cell == token).count()
    }

    /// Step from `pos` in the given direction.
    /// Returns None if the step leaves the board.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        if row < self.size && col < self.size {
            Some(Position::new(row, col))
        } else {
            None
        }
    }

    /// Edge-sharing neighbours of `pos`, in `ALL_DIRECTIONS` order.
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&dir| self.neighbor(pos, dir))
            .collect()
    }

    /// A copy of this board with the tokens at `a` and `b` exchanged.
    pub fn swapped(&self, a: Position, b: Position) -> Board {
        let mut cells = self.cells.clone();
        cells.swap(self.index(a), self.index(b));
        Board {
            size: self.size,
            cells,
        }
    }

    /// The canonical goal for this board's tokens: numbers ascending, then all
    /// red markers, then all green markers, laid out row-major.
    pub fn sorted(&self) -> Board {
        let mut cells = self.cells.clone();
        cells.sort_unstable();
        Board {
            size: self.size,
            cells,
        }
    }

    /// The board's token multiset, in sorted order.
    pub fn sorted_tokens(&self) -> Vec<Token> {
        self.sorted().cells.into_vec()
    }
}

impl fmt::Display for Board {
    /// `{}` prints space-separated rows; `{:#}` separates cells with `|` and
    /// rows with rulers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .map(|token| token.to_string().len())
            .max()
            .unwrap_or(1);
        let ruled = f.alternate();
        let separator = if ruled { "|" } else { " " };

        for (i, row) in self.rows().enumerate() {
            if ruled && i > 0 {
                let ruler = vec!["-".repeat(width); self.size].join("+");
                writeln!(f, "{}", ruler)?;
            }
            let line = row
                .iter()
                .map(|token| format!("{:>width$}", token, width = width))
                .collect::<Vec<_>>()
                .join(separator);
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
