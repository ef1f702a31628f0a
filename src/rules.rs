//! Game rules: move admissibility, five-in-a-row and draw detection.

use crate::board::{index, points, Board, Color, Point};
use crate::constants::{N, WIN_LEN};

/// A line direction on the board, with its protocol code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Left to right.
    Horizontal = 1,
    /// Top to bottom.
    Vertical = 2,
    /// Down and to the right.
    DiagonalDown = 3,
    /// Down and to the left.
    DiagonalUp = 4,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Column and row step of one move along the line.
    #[inline]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Cell `k` steps from `(x, y)` along `dir`, or `None` once it leaves the grid.
#[inline]
pub fn walk(x: usize, y: usize, dir: Direction, k: usize) -> Option<Point> {
    let (dx, dy) = dir.step();
    let nx = x as isize + dx * k as isize;
    let ny = y as isize + dy * k as isize;
    if nx < 0 || ny < 0 || nx >= N as isize || ny >= N as isize {
        return None;
    }
    Some((nx as usize, ny as usize))
}

/// A completed line of five.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Victory {
    /// First stone of the line in scan order.
    pub anchor: Point,
    pub direction: Direction,
}

impl Victory {
    /// The five cells of the line, starting at the anchor.
    pub fn cells(&self) -> [Point; WIN_LEN] {
        let (x, y) = self.anchor;
        let (dx, dy) = self.direction.step();
        std::array::from_fn(|k| {
            (
                (x as isize + dx * k as isize) as usize,
                (y as isize + dy * k as isize) as usize,
            )
        })
    }
}

/// An empty cell with at least one occupied neighbour.
#[inline]
pub fn is_admissible(board: &Board, x: usize, y: usize) -> bool {
    if x >= N || y >= N {
        return false;
    }
    is_admissible_at(board, index(x, y))
}

#[inline]
pub(crate) fn is_admissible_at(board: &Board, idx: usize) -> bool {
    board.at(idx).is_none() && board.has_neighbor(idx)
}

/// All admissible cells in row-major order.
pub fn candidates(board: &Board) -> Vec<Point> {
    points().filter(|&(x, y)| is_admissible(board, x, y)).collect()
}

/// First line of five stones of `color`, scanning cells in row-major order
/// and the four directions in [`Direction::ALL`] order.
pub fn is_victory(board: &Board, color: Color) -> Option<Victory> {
    for (x, y) in points() {
        if board.get(x, y) != Some(color) {
            continue;
        }
        for dir in Direction::ALL {
            let five = (1..WIN_LEN).all(|k| {
                walk(x, y, dir, k).is_some_and(|(cx, cy)| board.get(cx, cy) == Some(color))
            });
            if five {
                return Some(Victory {
                    anchor: (x, y),
                    direction: dir,
                });
            }
        }
    }
    None
}

/// True when no admissible cell is left.
pub fn is_draw(board: &Board) -> bool {
    !points().any(|(x, y)| is_admissible(board, x, y))
}
