//! Zobrist fingerprints of board positions.
//!
//! Every real cell owns one random code per cell state (empty, black,
//! white). The fingerprint of a board is the XOR of the codes of all cell
//! states, so placing or removing a stone updates it with two XORs. Equal
//! fingerprints do not prove equal positions; they are only used as cache
//! keys.

use crate::board::{index, points, Color};
use crate::constants::BOARDSIZE;

#[inline]
fn slot(stone: Option<Color>) -> usize {
    match stone {
        None => 0,
        Some(Color::Black) => 1,
        Some(Color::White) => 2,
    }
}

pub struct ZobristTable {
    codes: Vec<[u64; 3]>,
    empty_key: u64,
}

impl ZobristTable {
    /// Draw fresh codes from `rng`.
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let mut codes = vec![[0u64; 3]; BOARDSIZE];
        for (x, y) in points() {
            codes[index(x, y)] = [rng.u64(..), rng.u64(..), rng.u64(..)];
        }
        let empty_key = points().fold(0, |key, (x, y)| key ^ codes[index(x, y)][0]);
        Self { codes, empty_key }
    }

    /// Fingerprint of the all-empty board.
    #[inline]
    pub fn empty_key(&self) -> u64 {
        self.empty_key
    }

    /// Code for `stone` at the padded index `idx`.
    #[inline]
    pub fn code(&self, idx: usize, stone: Option<Color>) -> u64 {
        self.codes[idx][slot(stone)]
    }

    /// Fingerprint after toggling `color` at `idx` between empty and occupied.
    ///
    /// The update is its own inverse, so the same call both places and removes.
    #[inline]
    #[must_use]
    pub fn toggle(&self, key: u64, idx: usize, color: Color) -> u64 {
        key ^ self.code(idx, None) ^ self.code(idx, Some(color))
    }

    /// Full recomputation over a board, for verification.
    pub fn hash(&self, board: &crate::board::Board) -> u64 {
        points().fold(0, |key, (x, y)| {
            let idx = index(x, y);
            key ^ self.code(idx, board.at(idx))
        })
    }
}
