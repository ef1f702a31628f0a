use thiserror::Error;

/// Errors reported by the engine's public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No empty cell touches an existing stone.
    #[error("no legal move: no empty cell is adjacent to a stone")]
    NoLegalMove,
    /// Coordinates outside the playing grid.
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    /// The cell already holds a stone.
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },
}
