//! Line patterns used by the static evaluator.
//!
//! Each pattern is a short string read along a line of the board, starting at
//! some origin cell and stepping in one of the four scan directions:
//! - X: a stone of the player being evaluated
//! - O: an opponent stone
//! - .: an empty cell
//!
//! The end of the string is the end marker: once every character has
//! matched, the pattern's weight is credited. Shapes built from our own stones
//! carry positive weights, the mirrored opponent shapes carry (larger)
//! negative weights, and a completed five dominates everything else.

use std::sync::OnceLock;

use crate::board::{Board, Color};
use crate::rules::{walk, Direction};

/// Pattern source definitions with their weights.
const PATTERN_SRC: &[(&str, i32)] = &[
    // 1- open two
    (".XX.", 200),
    // 2- open three
    (".XXX.", 5000),
    // 3- four open on the far side
    ("XXXX.", 8000),
    // 4- three capped by the opponent
    ("OXXX.", 100),
    (".XXXO", 100),
    // 6- split threes
    (".XX.X.", 5000),
    (".X.XX.", 5000),
    // 8- five
    ("XXXXX", 1_000_000),
    // 9- four open on the near side
    (".XXXX", 8000),
    // 10- split fours
    ("X.XXX", 8000),
    ("XX.XX", 8000),
    ("XXX.X", 8000),
    // 13- split two
    (".X.X.", 200),
    // 14- opponent open two
    (".OO.", -300),
    // 15- opponent open three
    (".OOO.", -7000),
    // 16- opponent four
    ("OOOO.", -13000),
    // 17- opponent three we already cap
    ("XOOO.", -200),
    (".OOOX", -200),
    // 19- opponent split threes
    (".OO.O.", -7000),
    (".O.OO.", -7000),
    // 21- opponent five
    ("OOOOO", -1_200_000),
    // 22- opponent fours
    (".OOOO", -13000),
    ("O.OOO", -13000),
    ("OO.OO", -13000),
    ("OOO.O", -13000),
    // 26- opponent split two
    (".O.O.", -300),
];

/// What a template cell requires of the board cell it lands on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sym {
    Blank,
    Own,
    Opponent,
}

impl Sym {
    #[inline]
    fn matches(self, cell: Option<Color>, own: Color) -> bool {
        match self {
            Sym::Blank => cell.is_none(),
            Sym::Own => cell == Some(own),
            Sym::Opponent => cell == Some(own.opponent()),
        }
    }
}

/// A weighted line template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub template: Vec<Sym>,
    pub weight: i32,
}

impl Block {
    /// True if the whole template matches starting at `(x, y)` along `dir`.
    ///
    /// The match fails as soon as a template cell would fall off the grid.
    /// The end marker sits past the last template cell, so a template that
    /// ends flush with the edge still counts.
    #[inline]
    pub fn matches_at(
        &self,
        board: &Board,
        x: usize,
        y: usize,
        dir: Direction,
        own: Color,
    ) -> bool {
        self.template.iter().enumerate().all(|(k, sym)| match walk(x, y, dir, k) {
            Some((cx, cy)) => sym.matches(board.get(cx, cy), own),
            None => false,
        })
    }
}

static CATALOG: OnceLock<Vec<Block>> = OnceLock::new();

/// The pattern catalog, built on first use.
pub fn catalog() -> &'static [Block] {
    CATALOG.get_or_init(|| {
        PATTERN_SRC
            .iter()
            .map(|&(src, weight)| parse_block(src, weight))
            .collect()
    })
}

/// Build a block from its source string.
fn parse_block(src: &str, weight: i32) -> Block {
    let template = src
        .bytes()
        .map(|b| match b {
            b'X' => Sym::Own,
            b'O' => Sym::Opponent,
            _ => Sym::Blank,
        })
        .collect();
    Block { template, weight }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let blocks = catalog();
        assert_eq!(blocks.len(), 26);
        let own = blocks.iter().filter(|b| b.weight > 0).count();
        assert_eq!(own, 13);
        assert!(blocks.iter().all(|b| !b.template.is_empty() && b.template.len() <= 6));
    }

    #[test]
    fn test_opponent_shapes_mirror_own_shapes() {
        let blocks = catalog();
        let (own, opp) = blocks.split_at(13);
        for (a, b) in own.iter().zip(opp) {
            let swapped: Vec<Sym> = a
                .template
                .iter()
                .map(|s| match s {
                    Sym::Own => Sym::Opponent,
                    Sym::Opponent => Sym::Own,
                    Sym::Blank => Sym::Blank,
                })
                .collect();
            assert_eq!(swapped, b.template);
            assert!(b.weight < 0 && b.weight.abs() >= a.weight);
        }
    }

    #[test]
    fn test_parse_block() {
        let block = parse_block(".XO", 3);
        assert_eq!(block.template, vec![Sym::Blank, Sym::Own, Sym::Opponent]);
        assert_eq!(block.weight, 3);
    }

    #[test]
    fn test_matches_at_edges() {
        let mut board = Board::new();
        for x in 15..20 {
            board.set(x, 0, Some(Color::Black)).unwrap();
        }
        let five = parse_block("XXXXX", 1);
        assert!(five.matches_at(&board, 15, 0, Direction::Horizontal, Color::Black));
        assert!(!five.matches_at(&board, 15, 0, Direction::Horizontal, Color::White));
        let open = parse_block("XXXXX.", 1);
        assert!(!open.matches_at(&board, 15, 0, Direction::Horizontal, Color::Black));
    }
}
