//! Runtime engine configuration.

use std::time::Duration;

use crate::constants::{MAX_DEPTH, MOVE_TIME_MS, NOISE, TRANS_SIZE, YIELD_PERIOD};

/// Tunable engine parameters. `Default` uses the values from
/// [`constants`](crate::constants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Time budget for one move.
    pub move_time: Duration,
    /// Deepest iterative-deepening pass.
    pub max_depth: usize,
    /// Number of transposition cache slots.
    pub cache_capacity: usize,
    /// Exclusive bound of the evaluation noise; 0 disables it.
    pub noise: i32,
    /// Search frames between two yield points.
    pub yield_period: u64,
    /// Seed for the zobrist codes, noise and opening moves. `None` seeds
    /// from the system.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_time: Duration::from_millis(MOVE_TIME_MS),
            max_depth: MAX_DEPTH,
            cache_capacity: TRANS_SIZE,
            noise: NOISE,
            yield_period: YIELD_PERIOD,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_move_time(mut self, move_time: Duration) -> Self {
        self.move_time = move_time;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.move_time, Duration::from_millis(2500));
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.cache_capacity, 1_600_451);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_max_depth_is_at_least_one() {
        assert_eq!(EngineConfig::default().with_max_depth(0).max_depth, 1);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = EngineConfig::default().with_seed(42);
        assert_eq!(config.rng().u64(..), config.rng().u64(..));
    }
}
