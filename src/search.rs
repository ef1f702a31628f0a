//! Minimax search with alpha-beta pruning and iterative deepening.
//!
//! The search plays hypothetical stones on the engine's own position and
//! removes them again on the way back up; every transient stone is held by a
//! [`MoveGuard`](crate::position::MoveGuard), so cutoffs, time-outs and
//! cancellation all leave the board as they found it.
//!
//! - Passes run at depth 1, 2, 3, ... until the move budget is spent, the
//!   maximum depth is reached or the search is cancelled.
//! - Even plies maximise, odd plies minimise; leaves are scored by the
//!   pattern evaluator through the transposition cache.
//! - Along the first line explored in a pass, the move that last improved a
//!   bound at each depth is tried before the others.
//! - A frame that finds the budget spent returns [`Outcome::Aborted`]; such a
//!   result never reaches alpha, beta or the root best move.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::board::{index, point, points, Board, Color, Point};
use crate::cache::TransTable;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::pay_off;
use crate::position::Position;
use crate::rules::{self, is_admissible_at, Victory};

/// Bound used for the initial alpha-beta window.
const INF: i32 = i32::MAX;

/// Shared flag a host sets to stop a running search early.
///
/// The search checks it on entry and at every yield point and, once set,
/// unwinds and returns the best move found so far. A cancel raised while no
/// search is running stops the next one. The search that observes the
/// cancel clears the token again.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Result of one move search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// The chosen cell; always admissible.
    pub best_move: Point,
    /// Score of the chosen move, `None` if no root move finished evaluating.
    pub score: Option<i32>,
    /// Deepest pass that ran to completion.
    pub depth: usize,
    /// Search frames visited.
    pub nodes: u64,
    /// True if the cancel token stopped the search.
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Value of a search frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Outcome {
    Value(i32),
    Aborted,
}

/// What the frame does after trying one move.
enum Step {
    Continue,
    Cutoff(i32),
    Aborted,
}

/// Per-call search state threaded through the recursion.
struct SearchContext<'a> {
    /// Depth of the current pass; frames at this depth are leaves.
    pass_depth: usize,
    /// True until the first descent of the pass reaches the last inner ply.
    first_run: bool,
    /// Per-depth move hints carried from one pass to the next.
    hints: Vec<Option<usize>>,
    best: Option<(usize, i32)>,
    nodes: u64,
    start: Instant,
    budget: Duration,
    noise: i32,
    yield_period: u64,
    cancel: CancelToken,
    cancelled: bool,
    hook: Option<&'a mut (dyn FnMut() + 'static)>,
    cache: &'a mut TransTable,
    rng: &'a mut fastrand::Rng,
    /// Every `(depth, idx)` tried, in order.
    #[cfg(test)]
    trace: Vec<(usize, usize)>,
}

impl SearchContext<'_> {
    /// Hand control to the host and report whether it asked us to stop.
    fn pump(&mut self) -> bool {
        if let Some(hook) = self.hook.as_mut() {
            (*hook)();
        }
        if self.cancel.is_cancelled() {
            self.cancelled = true;
        }
        self.cancelled
    }

    fn offer_root(&mut self, idx: usize, price: i32) {
        if self.best.is_none_or(|(_, best)| price > best) {
            self.best = Some((idx, price));
        }
    }
}

/// The game engine: owns the position, the transposition cache and the
/// random source, and answers move and game-state queries.
pub struct Engine {
    config: EngineConfig,
    pos: Position,
    cache: TransTable,
    rng: fastrand::Rng,
    cancel: CancelToken,
    yield_hook: Option<Box<dyn FnMut()>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = config.rng();
        let pos = Position::new(&mut rng);
        let cache = TransTable::new(config.cache_capacity);
        Self {
            config,
            pos,
            cache,
            rng,
            cancel: CancelToken::new(),
            yield_hook: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_move_time(&mut self, move_time: Duration) {
        self.config.move_time = move_time;
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth.max(1);
    }

    pub fn board(&self) -> &Board {
        self.pos.board()
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Current position fingerprint.
    pub fn key(&self) -> u64 {
        self.pos.key()
    }

    pub fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    /// Token that stops a running search when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Install a callback run at every yield point of the search, e.g. to
    /// pump a host event loop. It may cancel the search through the token.
    pub fn set_yield_hook<F: FnMut() + 'static>(&mut self, hook: F) {
        self.yield_hook = Some(Box::new(hook));
    }

    pub fn clear_yield_hook(&mut self) {
        self.yield_hook = None;
    }

    /// Empty the board and the cache for a new game.
    pub fn reset_for_new_game(&mut self) {
        self.pos.clear();
        self.cache.clear();
    }

    /// Place a stone played in the actual game.
    pub fn place_stone(&mut self, color: Color, x: usize, y: usize) -> Result<(), EngineError> {
        self.pos.place_stone(color, x, y)
    }

    pub fn is_victory(&self, color: Color) -> Option<Victory> {
        rules::is_victory(self.pos.board(), color)
    }

    pub fn is_draw(&self) -> bool {
        rules::is_draw(self.pos.board())
    }

    pub fn candidates(&self) -> Vec<Point> {
        rules::candidates(self.pos.board())
    }

    /// Best move for `color` within the move budget.
    pub fn get_best_move(&mut self, color: Color) -> Result<Point, EngineError> {
        self.search(color).map(|report| report.best_move)
    }

    /// Run the iterative-deepening search for `color`.
    ///
    /// If the cancel token is already set, no pass runs and the fallback
    /// move is returned at depth 0.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoLegalMove`] if no cell is admissible.
    pub fn search(&mut self, color: Color) -> Result<SearchReport, EngineError> {
        let start = Instant::now();
        let fallback = points()
            .map(|(x, y)| index(x, y))
            .find(|&idx| is_admissible_at(self.pos.board(), idx))
            .ok_or(EngineError::NoLegalMove)?;

        self.cache.clear();
        let max_depth = self.config.max_depth.max(1);

        let mut ctx = SearchContext {
            pass_depth: 0,
            first_run: false,
            hints: vec![None; max_depth + 1],
            best: None,
            nodes: 0,
            start,
            budget: self.config.move_time,
            noise: self.config.noise,
            yield_period: self.config.yield_period.max(1),
            cancel: self.cancel.clone(),
            cancelled: self.cancel.is_cancelled(),
            hook: self.yield_hook.as_deref_mut(),
            cache: &mut self.cache,
            rng: &mut self.rng,
            #[cfg(test)]
            trace: Vec::new(),
        };

        let mut completed = 0;
        for depth in 1..=max_depth {
            if start.elapsed() >= ctx.budget || ctx.cancelled {
                break;
            }
            ctx.pass_depth = depth;
            ctx.first_run = true;
            match minimax(&mut self.pos, &mut ctx, color, 0, -INF, INF) {
                Outcome::Value(_) => {
                    completed = depth;
                    debug!(
                        "depth {depth}: best {:?} score {:?} nodes {} ({:?})",
                        ctx.best.map(|(idx, _)| point(idx)),
                        ctx.best.map(|(_, score)| score),
                        ctx.nodes,
                        start.elapsed()
                    );
                }
                Outcome::Aborted => {
                    debug!("depth {depth}: abandoned after {} nodes", ctx.nodes);
                    break;
                }
            }
        }

        let stats = ctx.cache.stats();
        trace!(
            "cache: {} hits, {} misses, {} stores",
            stats.hits, stats.misses, stats.stores
        );
        debug_assert!(self.pos.board().all_permanent());

        let report = SearchReport {
            best_move: point(ctx.best.map_or(fallback, |(idx, _)| idx)),
            score: ctx.best.map(|(_, score)| score),
            depth: completed,
            nodes: ctx.nodes,
            cancelled: ctx.cancelled,
            elapsed: start.elapsed(),
        };
        info!(
            "{color} plays {:?} (score {:?}, depth {}, {} nodes, {:?})",
            report.best_move, report.score, report.depth, report.nodes, report.elapsed
        );
        if report.cancelled {
            self.cancel.reset();
        }
        Ok(report)
    }
}

/// Admissible cells as padded indices, in row-major order.
fn move_list(board: &Board) -> Vec<usize> {
    points()
        .map(|(x, y)| index(x, y))
        .filter(|&idx| is_admissible_at(board, idx))
        .collect()
}

/// One minimax frame; `color` is the side placing a stone at this ply.
fn minimax(
    pos: &mut Position,
    ctx: &mut SearchContext<'_>,
    color: Color,
    depth: usize,
    mut alpha: i32,
    mut beta: i32,
) -> Outcome {
    if ctx.cancelled {
        return Outcome::Aborted;
    }
    ctx.nodes += 1;
    if ctx.nodes % ctx.yield_period == 0 && ctx.pump() {
        return Outcome::Aborted;
    }

    if depth == ctx.pass_depth {
        let key = pos.key();
        if let Some(value) = ctx.cache.lookup(key) {
            return Outcome::Value(value);
        }
        // Parity flips the side back, so leaves are always scored for the root mover.
        let perspective = if depth % 2 == 0 { color } else { color.opponent() };
        let value = pay_off(pos.board(), perspective, ctx.rng, ctx.noise);
        ctx.cache.store(key, value);
        return Outcome::Value(value);
    }

    if ctx.start.elapsed() > ctx.budget {
        return Outcome::Aborted;
    }

    if ctx.first_run && depth + 1 == ctx.pass_depth {
        ctx.first_run = false;
    }

    let mut hinted = None;
    if ctx.first_run && ctx.pass_depth > 1 {
        let hint = ctx.hints[depth].filter(|&idx| is_admissible_at(pos.board(), idx));
        if let Some(idx) = hint {
            hinted = Some(idx);
            match try_move(pos, ctx, color, depth, idx, &mut alpha, &mut beta, false) {
                Step::Continue => {}
                Step::Cutoff(value) => return Outcome::Value(value),
                Step::Aborted => return Outcome::Aborted,
            }
        }
    }

    for idx in move_list(pos.board()) {
        if hinted == Some(idx) {
            continue;
        }
        match try_move(pos, ctx, color, depth, idx, &mut alpha, &mut beta, true) {
            Step::Continue => {}
            Step::Cutoff(value) => return Outcome::Value(value),
            Step::Aborted => return Outcome::Aborted,
        }
    }

    Outcome::Value(if depth % 2 == 0 { alpha } else { beta })
}

/// Play `idx` for `color`, search the reply and fold the result into the
/// window. The stone is gone again by the time this returns.
#[allow(clippy::too_many_arguments)]
fn try_move(
    pos: &mut Position,
    ctx: &mut SearchContext<'_>,
    color: Color,
    depth: usize,
    idx: usize,
    alpha: &mut i32,
    beta: &mut i32,
    record_hint: bool,
) -> Step {
    #[cfg(test)]
    ctx.trace.push((depth, idx));

    let price = {
        let mut child = pos.make_move(idx, color);
        match minimax(&mut child, ctx, color.opponent(), depth + 1, *alpha, *beta) {
            Outcome::Value(value) => value,
            Outcome::Aborted => return Step::Aborted,
        }
    };

    let maximizing = depth % 2 == 0;
    let improved = if maximizing && price > *alpha {
        *alpha = price;
        true
    } else if !maximizing && price < *beta {
        *beta = price;
        true
    } else {
        false
    };
    if improved && record_hint {
        ctx.hints[depth] = Some(idx);
    }
    if depth == 0 {
        ctx.offer_root(idx, price);
    }

    if *alpha >= *beta {
        return Step::Cutoff(if maximizing { *alpha } else { *beta });
    }
    Step::Continue
}
