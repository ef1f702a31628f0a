//! Game position: the board together with its running fingerprint.
//!
//! Stones are placed either permanently (actual play) or transiently while
//! the search explores a line. Transient stones are placed through
//! [`Position::make_move`], which returns a [`MoveGuard`]; dropping the guard
//! removes the stone and restores the fingerprint, whichever way the caller
//! leaves the scope.

use std::ops::{Deref, DerefMut};

use crate::board::{in_bounds, index, Board, Color};
use crate::error::EngineError;
use crate::zobrist::ZobristTable;

pub struct Position {
    board: Board,
    zobrist: ZobristTable,
    key: u64,
}

impl Position {
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let zobrist = ZobristTable::new(rng);
        let key = zobrist.empty_key();
        Self {
            board: Board::new(),
            zobrist,
            key,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current fingerprint.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    /// Empty the board and reset the fingerprint to the empty-board value.
    pub fn clear(&mut self) {
        self.board.clear();
        self.key = self.zobrist.empty_key();
    }

    /// Place a permanent stone, as played in the actual game.
    pub fn place_stone(&mut self, color: Color, x: usize, y: usize) -> Result<(), EngineError> {
        if !in_bounds(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        let idx = index(x, y);
        if self.board.at(idx).is_some() {
            return Err(EngineError::Occupied { x, y });
        }
        self.board.put(idx, Some(color), true);
        self.key = self.zobrist.toggle(self.key, idx, color);
        Ok(())
    }

    /// Place a transient stone at the padded index `idx`, which must be empty.
    ///
    /// The stone lives as long as the returned guard.
    pub fn make_move(&mut self, idx: usize, color: Color) -> MoveGuard<'_> {
        debug_assert!(self.board.at(idx).is_none());
        self.board.put(idx, Some(color), false);
        self.key = self.zobrist.toggle(self.key, idx, color);
        MoveGuard {
            pos: self,
            idx,
            color,
        }
    }
}

/// A transient stone; removed again on drop.
pub struct MoveGuard<'a> {
    pos: &'a mut Position,
    idx: usize,
    color: Color,
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.pos.board.put(self.idx, None, false);
        self.pos.key = self.pos.zobrist.toggle(self.pos.key, self.idx, self.color);
    }
}
