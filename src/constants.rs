//! Constants for board geometry, search limits and evaluation.
//!
//! The board uses a 1D array with a one-cell border of padding on every side,
//! so neighbour lookups at offsets of ±1 never leave the array.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 20;

/// Board width including padding (N + 2 for padding on both sides).
pub const W: usize = N + 2;

/// Total board array size including all padding.
pub const BOARDSIZE: usize = W * W;

/// Number of stones in a winning line.
pub const WIN_LEN: usize = 5;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default time budget for one move, in milliseconds.
pub const MOVE_TIME_MS: u64 = 2500;

/// Deepest ply iterative deepening will attempt.
pub const MAX_DEPTH: usize = 20;

/// Number of slots in the transposition cache.
pub const TRANS_SIZE: usize = 1_600_451;

/// Frames between two cooperative yield points.
pub const YIELD_PERIOD: u64 = 400;

// =============================================================================
// Evaluation
// =============================================================================

/// Exclusive upper bound of the tie-breaking noise added to every evaluation.
pub const NOISE: i32 = 30;

/// Stones in the central opening region are at least this far from the edge.
pub const OPENING_MARGIN: usize = 5;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Offsets to neighboring cells in the 1D board array.
/// Order: North, East, South, West, NE, SE, SW, NW
pub const DELTA: [isize; 8] = [
    -(W as isize),     // North (up one row)
    1,                 // East (right one column)
    W as isize,        // South (down one row)
    -1,                // West (left one column)
    -(W as isize) + 1, // NE (diagonal)
    W as isize + 1,    // SE (diagonal)
    W as isize - 1,    // SW (diagonal)
    -(W as isize) - 1, // NW (diagonal)
];
