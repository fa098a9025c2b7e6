use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Token};
use crate::moves::Swap;

/// Zobrist hash for boards over a fixed token alphabet.
pub struct Zobrist {
    /// Sorted, deduplicated tokens that may appear on the board.
    alphabet: Vec<Token>,
    /// keys[cell * alphabet.len() + ordinal]
    keys: Vec<u64>,
}

impl Zobrist {
    /// Build keys for every cell of an `size x size` board and every token
    /// appearing on any of `boards`.
    pub fn new(size: usize, boards: &[&Board]) -> Self {
        let mut alphabet: Vec<Token> = boards
            .iter()
            .flat_map(|board| board.cells().iter().copied())
            .collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        // Use a seeded PRNG for reproducible Zobrist hashes
        let mut rng = ChaCha8Rng::seed_from_u64(0x123456789abcdef0);
        let keys = (0..size * size * alphabet.len())
            .map(|_| rng.next_u64())
            .collect();

        Zobrist { alphabet, keys }
    }

    /// Key for `token` sitting in the cell with row-major index `cell`.
    /// Tokens outside the alphabet share a zero key; equality checks on
    /// lookup keep identity exact regardless.
    fn key(&self, cell: usize, token: Token) -> u64 {
        self.alphabet
            .binary_search(&token)
            .map_or(0, |ordinal| self.keys[cell * self.alphabet.len() + ordinal])
    }

    pub fn hash(&self, board: &Board) -> u64 {
        board
            .cells()
            .iter()
            .enumerate()
            .fold(0u64, |hash, (cell, &token)| hash ^ self.key(cell, token))
    }

    /// Hash of `board.swapped(swap.from, swap.to)`, given `hash` of `board`.
    pub fn swap_hash(&self, hash: u64, board: &Board, swap: Swap) -> u64 {
        let a = board.index(swap.from);
        let b = board.index(swap.to);
        let token_a = board.get(swap.from);
        let token_b = board.get(swap.to);
        hash ^ self.key(a, token_a)
            ^ self.key(b, token_b)
            ^ self.key(a, token_b)
            ^ self.key(b, token_a)
    }
}
