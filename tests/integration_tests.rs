//! Integration tests for the board, rules, fingerprints and cache.

use gomoku_rust::board::{index, points, Board, Color, Point};
use gomoku_rust::cache::TransTable;
use gomoku_rust::constants::N;
use gomoku_rust::position::Position;
use gomoku_rust::rules::{candidates, is_admissible, is_draw, is_victory, walk, Direction};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Scatter `count` random stones inside the `size`x`size` window at `origin`.
fn random_window(rng: &mut fastrand::Rng, origin: Point, size: usize, count: usize) -> Board {
    let mut board = Board::new();
    for _ in 0..count {
        let x = origin.0 + rng.usize(..size);
        let y = origin.1 + rng.usize(..size);
        let color = if rng.bool() { Color::Black } else { Color::White };
        board.set(x, y, Some(color)).unwrap();
    }
    board
}

/// Reference five-in-a-row check written independently of `rules`.
fn has_five(board: &Board, color: Color) -> bool {
    let steps: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    for y in 0..N as isize {
        for x in 0..N as isize {
            for (dx, dy) in steps {
                let run = (0..5).all(|k| {
                    let (cx, cy) = (x + dx * k, y + dy * k);
                    cx >= 0
                        && cy >= 0
                        && (cx as usize) < N
                        && (cy as usize) < N
                        && board.get(cx as usize, cy as usize) == Some(color)
                });
                if run {
                    return true;
                }
            }
        }
    }
    false
}

// =============================================================================
// Terminal detection
// =============================================================================

#[test]
fn test_victory_every_five_in_window() {
    // Every five that fits in a 7x7 window, at both ends of the board.
    for origin in [(0, 0), (N - 7, N - 7), (0, N - 7)] {
        for (ox, oy) in (0..7).flat_map(|y| (0..7).map(move |x| (x, y))) {
            for dir in Direction::ALL {
                let x = origin.0 + ox;
                let y = origin.1 + oy;
                let Some(end) = walk(x, y, dir, 4) else {
                    continue;
                };
                if end.0 < origin.0 || end.0 >= origin.0 + 7 || end.1 >= origin.1 + 7 {
                    continue;
                }

                let mut board = Board::new();
                for k in 0..5 {
                    let (cx, cy) = walk(x, y, dir, k).unwrap();
                    board.set(cx, cy, Some(Color::Black)).unwrap();
                }
                let victory = is_victory(&board, Color::Black)
                    .unwrap_or_else(|| panic!("missed five at ({x},{y}) {dir:?}"));
                assert_eq!(victory.anchor, (x, y));
                assert_eq!(victory.direction, dir);
                assert_eq!(is_victory(&board, Color::White), None);
            }
        }
    }
}

#[test]
fn test_victory_matches_reference_on_random_windows() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let mut found = 0;
    for _ in 0..3000 {
        let origin = (rng.usize(..=N - 7), rng.usize(..=N - 7));
        let count = rng.usize(10..40);
        let board = random_window(&mut rng, origin, 7, count);
        for color in [Color::Black, Color::White] {
            let victory = is_victory(&board, color);
            assert_eq!(victory.is_some(), has_five(&board, color), "\n{board}");
            if let Some(v) = victory {
                found += 1;
                assert!(v.cells().iter().all(|&(x, y)| board.get(x, y) == Some(color)));
            }
        }
    }
    assert!(found > 0, "random boards never produced a five");
}

#[test]
fn test_row_zero_victory() {
    let mut board = Board::new();
    for x in 0..5 {
        board.set(x, 0, Some(Color::Black)).unwrap();
    }
    let victory = is_victory(&board, Color::Black).unwrap();
    assert_eq!(victory.anchor, (0, 0));
    assert_eq!(victory.direction, Direction::Horizontal);
    assert_eq!(victory.direction.code(), 1);
}

// =============================================================================
// Draw and admissibility
// =============================================================================

#[test]
fn test_draw_iff_no_candidates() {
    let mut rng = fastrand::Rng::with_seed(7);
    for count in [0, 1, 5, 30] {
        let board = random_window(&mut rng, (3, 3), 12, count);
        assert_eq!(is_draw(&board), candidates(&board).is_empty());
        assert_eq!(is_draw(&board), count == 0);
    }
}

#[test]
fn test_full_board_is_draw() {
    let mut board = Board::new();
    for (x, y) in points() {
        let color = if (x / 2 + y) % 2 == 0 { Color::Black } else { Color::White };
        board.set(x, y, Some(color)).unwrap();
    }
    assert!(is_draw(&board));
    assert!(candidates(&board).is_empty());
}

#[test]
fn test_candidates_are_row_major_and_admissible() {
    let mut rng = fastrand::Rng::with_seed(99);
    let board = random_window(&mut rng, (4, 4), 10, 15);
    let cands = candidates(&board);
    assert!(cands.windows(2).all(|w| (w[0].1, w[0].0) < (w[1].1, w[1].0)));
    for (x, y) in points() {
        assert_eq!(cands.contains(&(x, y)), is_admissible(&board, x, y));
    }
}

// =============================================================================
// Fingerprints and cache
// =============================================================================

#[test]
fn test_fingerprint_roundtrip_at_every_candidate() {
    let mut rng = fastrand::Rng::with_seed(31);
    let mut pos = Position::new(&mut rng);
    for &(x, y, c) in &[
        (9, 9, Color::Black),
        (10, 9, Color::White),
        (10, 10, Color::Black),
        (0, 19, Color::White),
    ] {
        pos.place_stone(c, x, y).unwrap();
    }
    let before = pos.key();
    for (x, y) in candidates(pos.board()) {
        for color in [Color::Black, Color::White] {
            {
                let guard = pos.make_move(index(x, y), color);
                assert_ne!(guard.key(), before);
                assert_eq!(guard.key(), guard.zobrist().hash(guard.board()));
            }
            assert_eq!(pos.key(), before);
        }
    }
    assert_eq!(pos.board().stone_count(), 4);
}

#[test]
fn test_fingerprint_is_order_independent() {
    let mut rng = fastrand::Rng::with_seed(8);
    let mut a = Position::new(&mut rng.clone());
    let mut b = Position::new(&mut rng);
    a.place_stone(Color::Black, 1, 2).unwrap();
    a.place_stone(Color::White, 3, 4).unwrap();
    b.place_stone(Color::White, 3, 4).unwrap();
    b.place_stone(Color::Black, 1, 2).unwrap();
    assert_eq!(a.key(), b.key());
}

#[test]
fn test_cache_slot_collision_never_aliases() {
    let capacity = 1_009u64;
    let mut tt = TransTable::new(capacity as usize);
    let first = 123_456u64;
    let second = first + capacity * 17;
    tt.store(first, 111);
    tt.store(second, 222);
    assert_eq!(tt.lookup(second), Some(222));
    assert_eq!(tt.lookup(first), None);
    tt.store(first, 333);
    assert_eq!(tt.lookup(second), None);
    assert_eq!(tt.lookup(first), Some(333));
}
