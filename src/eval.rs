//! Static evaluation.

use crate::board::{points, Board, Color};
use crate::patterns::catalog;
use crate::rules::Direction;

/// Sum of the weights of every pattern occurrence on the board, seen from
/// `color`. Each (block, origin, direction) triple contributes at most once.
pub fn pattern_score(board: &Board, color: Color) -> i32 {
    let mut result = 0;
    for block in catalog() {
        for (x, y) in points() {
            for dir in Direction::ALL {
                if block.matches_at(board, x, y, dir, color) {
                    result += block.weight;
                }
            }
        }
    }
    result
}

/// Pay-off of the position for `color`: the pattern score plus a little
/// noise in `0..noise`, so equally scored moves do not always resolve the
/// same way.
pub fn pay_off(board: &Board, color: Color, rng: &mut fastrand::Rng, noise: i32) -> i32 {
    let jitter = if noise > 0 { rng.i32(0..noise) } else { 0 };
    pattern_score(board, color) + jitter
}
