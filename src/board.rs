//! Board representation.
//!
//! Cells are stored in a 1D array with one cell of padding around the grid.
//! The padding is never written, so it always reads as empty and the eight
//! neighbours of any real cell can be reached without bounds checks.
//!
//! Every cell also carries a `permanent` flag: stones placed by actual play
//! are permanent, stones placed while the search explores a line are not.

use std::fmt;

use crate::constants::{BOARDSIZE, N, W};
use crate::error::EngineError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A cell on the board as `(x, y)`, i.e. `(column, row)`.
pub type Point = (usize, usize);

/// Index into the padded array for the real cell `(x, y)`.
#[inline]
pub fn index(x: usize, y: usize) -> usize {
    (y + 1) * W + x + 1
}

/// Inverse of [`index`] for cells inside the grid.
#[inline]
pub fn point(idx: usize) -> Point {
    (idx % W - 1, idx / W - 1)
}

#[inline]
pub fn in_bounds(x: usize, y: usize) -> bool {
    x < N && y < N
}

/// All cells of the grid in row-major order.
pub fn points() -> impl Iterator<Item = Point> {
    (0..N).flat_map(|y| (0..N).map(move |x| (x, y)))
}

#[derive(Clone)]
pub struct Board {
    cells: [Option<Color>; BOARDSIZE],
    permanent: [bool; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARDSIZE],
            permanent: [false; BOARDSIZE],
        }
    }

    /// Stone at `(x, y)`; `None` for empty cells and for coordinates off the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if !in_bounds(x, y) {
            return None;
        }
        self.cells[index(x, y)]
    }

    /// Overwrite a cell. The permanent flag is left untouched.
    pub fn set(&mut self, x: usize, y: usize, stone: Option<Color>) -> Result<(), EngineError> {
        if !in_bounds(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        self.cells[index(x, y)] = stone;
        Ok(())
    }

    pub fn is_permanent(&self, x: usize, y: usize) -> bool {
        in_bounds(x, y) && self.permanent[index(x, y)]
    }

    pub fn set_permanent(
        &mut self,
        x: usize,
        y: usize,
        permanent: bool,
    ) -> Result<(), EngineError> {
        if !in_bounds(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        self.permanent[index(x, y)] = permanent;
        Ok(())
    }

    #[inline]
    pub(crate) fn at(&self, idx: usize) -> Option<Color> {
        self.cells[idx]
    }

    #[inline]
    pub(crate) fn put(&mut self, idx: usize, stone: Option<Color>, permanent: bool) {
        self.cells[idx] = stone;
        self.permanent[idx] = permanent;
    }

    /// True if any of the eight neighbours of `idx` holds a stone.
    #[inline]
    pub(crate) fn has_neighbor(&self, idx: usize) -> bool {
        crate::constants::DELTA
            .iter()
            .any(|&d| self.cells[(idx as isize + d) as usize].is_some())
    }

    /// Remove every stone and clear every permanent flag.
    pub fn clear(&mut self) {
        self.cells = [None; BOARDSIZE];
        self.permanent = [false; BOARDSIZE];
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// True if every stone on the board was placed by actual play.
    pub fn all_permanent(&self) -> bool {
        self.cells
            .iter()
            .zip(self.permanent.iter())
            .all(|(c, &p)| c.is_none() || p)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let ch = match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
