use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::board::{Board, Token};
use crate::error::PuzzleError;
use crate::evaluation::Evaluation;
use crate::heuristic::HeuristicKind;

/// One search problem read from a puzzle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub initial: Board,
    pub goal: Board,
    /// Selectors given in the file, if any.
    pub evaluation: Option<Evaluation>,
    pub heuristic: Option<HeuristicKind>,
}

impl Puzzle {
    /// Parse a single puzzle: `n`, `n*n` initial tokens, optionally `n*n`
    /// goal tokens, optionally the evaluation and heuristic selectors.
    ///
    /// Without an explicit goal, the goal is the initial tokens sorted.
    pub fn from_text(text: &str) -> Result<Self, PuzzleError> {
        let mut words = text.split_whitespace();
        let size_word = words
            .next()
            .ok_or_else(|| PuzzleError::InvalidPuzzle("empty puzzle".to_string()))?;
        let size = usize::from_str(size_word).map_err(|_| {
            PuzzleError::InvalidPuzzle(format!("invalid board size '{}'", size_word))
        })?;
        let rest: Vec<&str> = words.collect();
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| PuzzleError::InvalidPuzzle(format!("board size {} too large", size)))?;

        let (initial_words, goal_words, selector_words) = match rest.len().checked_sub(cells) {
            Some(0) => (&rest[..], None, None),
            Some(2) => (&rest[..cells], None, Some(&rest[cells..])),
            Some(extra) if extra == cells => (&rest[..cells], Some(&rest[cells..]), None),
            Some(extra) if extra == cells + 2 => (
                &rest[..cells],
                Some(&rest[cells..2 * cells]),
                Some(&rest[2 * cells..]),
            ),
            _ => {
                return Err(PuzzleError::InvalidPuzzle(format!(
                    "expected {} or {} tokens after size {} (with optional 2 selectors), got {}",
                    cells,
                    2 * cells,
                    size,
                    rest.len()
                )));
            }
        };

        let initial = Board::from_cells(size, parse_tokens(initial_words)?)?;
        let goal = match goal_words {
            Some(words) => Board::from_cells(size, parse_tokens(words)?)?,
            None => initial.sorted(),
        };

        let (evaluation, heuristic) = match selector_words {
            Some(&[evaluation, heuristic]) => (
                Some(Evaluation::try_from(parse_selector(evaluation)?)?),
                Some(HeuristicKind::try_from(parse_selector(heuristic)?)?),
            ),
            _ => (None, None),
        };

        Ok(Puzzle {
            initial,
            goal,
            evaluation,
            heuristic,
        })
    }
}

fn parse_tokens(words: &[&str]) -> Result<Vec<Token>, PuzzleError> {
    words
        .iter()
        .map(|word| Token::from_str(word).map_err(PuzzleError::from))
        .collect()
}

fn parse_selector(word: &str) -> Result<u8, PuzzleError> {
    u8::from_str(word)
        .map_err(|_| PuzzleError::InvalidPuzzle(format!("invalid selector '{}'", word)))
}

/// A collection of puzzles.
#[derive(Debug)]
pub struct Puzzles {
    puzzles: Vec<Puzzle>,
}

impl Puzzles {
    /// Parse puzzles from a string.
    ///
    /// Lines starting with `;` separate puzzles and are otherwise ignored.
    /// Blocks containing only whitespace are skipped.
    pub fn from_text(contents: &str) -> Result<Self, PuzzleError> {
        let mut puzzles = Vec::new();
        let mut current = String::new();

        for line in contents.lines() {
            if line.trim_start().starts_with(';') {
                if !current.trim().is_empty() {
                    puzzles.push(Puzzle::from_text(&current)?);
                }
                current.clear();
                continue;
            }
            current.push_str(line);
            current.push('\n');
        }

        if !current.trim().is_empty() {
            puzzles.push(Puzzle::from_text(&current)?);
        }

        Ok(Puzzles { puzzles })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text(&contents)
    }

    /// Get the nth puzzle (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter()
    }
}
