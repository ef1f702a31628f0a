//! Match flow between a human and the engine, or the engine against itself.
//!
//! This is the game loop a front end drives: it places stones, asks the
//! engine for replies, detects wins and draws, keeps the score and starts the
//! next game. It reports what happened as a list of [`GameEvent`]s and leaves
//! all drawing to the caller.
//!
//! The human plays White and the engine plays Black. Openings alternate: in
//! every odd-numbered game the engine opens with a random stone near the
//! centre, in the others the human moves first.

use log::info;

use crate::board::{Color, Point};
use crate::constants::{N, OPENING_MARGIN};
use crate::error::EngineError;
use crate::rules::Victory;
use crate::search::Engine;

/// Side the human plays.
pub const HUMAN: Color = Color::White;

/// Side the engine plays against a human.
pub const ENGINE: Color = Color::Black;

/// Something a front end should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Placed { color: Color, point: Point },
    Victory { color: Color, victory: Victory },
    Draw,
    /// The board was cleared; `game` counts games since the match began.
    NewGame { game: u32 },
}

pub struct Match {
    engine: Engine,
    black_wins: u32,
    white_wins: u32,
    game_count: u32,
}

impl Match {
    pub fn new(engine: Engine) -> Self {
        let mut m = Self {
            engine,
            black_wins: 0,
            white_wins: 0,
            game_count: 0,
        };
        m.new_match();
        m
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn score(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_wins,
            Color::White => self.white_wins,
        }
    }

    pub fn game_count(&self) -> u32 {
        self.game_count
    }

    /// Zero the scores and start from an empty board with the human to move.
    pub fn new_match(&mut self) {
        self.black_wins = 0;
        self.white_wins = 0;
        self.game_count = 0;
        self.engine.reset_for_new_game();
    }

    /// Random cell in the central region of the board.
    fn opening_point(&mut self) -> Point {
        let span = N - 2 * OPENING_MARGIN;
        let rng = self.engine.rng();
        (
            OPENING_MARGIN + rng.usize(..span),
            OPENING_MARGIN + rng.usize(..span),
        )
    }

    fn place(
        &mut self,
        color: Color,
        point: Point,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), EngineError> {
        self.engine.place_stone(color, point.0, point.1)?;
        events.push(GameEvent::Placed { color, point });
        Ok(())
    }

    /// Clear the board for the next game; in odd games the engine opens.
    fn next_game(
        &mut self,
        engine_color: Color,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), EngineError> {
        self.engine.reset_for_new_game();
        self.game_count += 1;
        events.push(GameEvent::NewGame {
            game: self.game_count,
        });
        if self.game_count % 2 == 1 {
            let point = self.opening_point();
            self.place(engine_color, point, events)?;
        }
        Ok(())
    }

    /// Check the board after `color` moved. Returns true if the game ended
    /// and a new one was started.
    fn settle(
        &mut self,
        color: Color,
        engine_color: Color,
        events: &mut Vec<GameEvent>,
    ) -> Result<bool, EngineError> {
        if let Some(victory) = self.engine.is_victory(color) {
            match color {
                Color::Black => self.black_wins += 1,
                Color::White => self.white_wins += 1,
            }
            info!(
                "{color} wins at {:?}; score black {} white {}",
                victory.anchor, self.black_wins, self.white_wins
            );
            events.push(GameEvent::Victory { color, victory });
            self.next_game(engine_color, events)?;
            return Ok(true);
        }
        if self.engine.is_draw() {
            info!("draw");
            events.push(GameEvent::Draw);
            self.next_game(engine_color, events)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// The human plays `(x, y)`; the engine answers unless the game ended.
    ///
    /// # Errors
    ///
    /// Rejects cells that are off the board or occupied; the board is left
    /// unchanged in that case.
    pub fn play_human(&mut self, x: usize, y: usize) -> Result<Vec<GameEvent>, EngineError> {
        let mut events = Vec::new();
        self.place(HUMAN, (x, y), &mut events)?;
        if self.settle(HUMAN, ENGINE, &mut events)? {
            return Ok(events);
        }
        let reply = self.engine.get_best_move(ENGINE)?;
        self.place(ENGINE, reply, &mut events)?;
        self.settle(ENGINE, ENGINE, &mut events)?;
        Ok(events)
    }

    /// One round of engine self-play: Black moves, then White.
    ///
    /// An empty board gets a random central stone instead of a search.
    pub fn demo_round(&mut self) -> Result<Vec<GameEvent>, EngineError> {
        let mut events = Vec::new();
        for color in [Color::Black, Color::White] {
            let point = if self.engine.board().stone_count() == 0 {
                self.opening_point()
            } else {
                self.engine.get_best_move(color)?
            };
            self.place(color, point, &mut events)?;
            if self.settle(color, Color::White, &mut events)? {
                break;
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::EngineConfig;

    fn quick_match() -> Match {
        let config = EngineConfig {
            cache_capacity: 4_099,
            ..EngineConfig::default()
        }
        .with_move_time(Duration::from_millis(50))
        .with_max_depth(1)
        .with_seed(17);
        Match::new(Engine::new(config))
    }

    #[test]
    fn test_new_match_is_empty() {
        let m = quick_match();
        assert_eq!(m.engine().board().stone_count(), 0);
        assert_eq!(m.score(Color::Black), 0);
        assert_eq!(m.game_count(), 0);
    }

    #[test]
    fn test_human_move_gets_reply() {
        let mut m = quick_match();
        let events = m.play_human(10, 10).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            GameEvent::Placed {
                color: HUMAN,
                point: (10, 10)
            }
        );
        assert!(matches!(events[1], GameEvent::Placed { color: ENGINE, .. }));
        assert_eq!(m.engine().board().stone_count(), 2);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut m = quick_match();
        m.play_human(10, 10).unwrap();
        assert_eq!(m.play_human(10, 10), Err(EngineError::Occupied { x: 10, y: 10 }));
        assert_eq!(m.engine().board().stone_count(), 2);
    }

    #[test]
    fn test_opening_point_is_central() {
        let mut m = quick_match();
        for _ in 0..50 {
            let (x, y) = m.opening_point();
            assert!((OPENING_MARGIN..N - OPENING_MARGIN).contains(&x));
            assert!((OPENING_MARGIN..N - OPENING_MARGIN).contains(&y));
        }
    }

    #[test]
    fn test_human_win_scores_and_engine_opens_next_game() {
        let mut m = quick_match();
        for x in 0..4 {
            m.engine_mut().place_stone(HUMAN, x, 0).unwrap();
        }
        m.engine_mut().place_stone(ENGINE, 0, 5).unwrap();
        let events = m.play_human(4, 0).unwrap();
        assert!(matches!(events[1], GameEvent::Victory { color: HUMAN, .. }));
        assert_eq!(events[2], GameEvent::NewGame { game: 1 });
        assert!(matches!(events[3], GameEvent::Placed { color: ENGINE, .. }));
        assert_eq!(m.score(HUMAN), 1);
        assert_eq!(m.engine().board().stone_count(), 1);
    }

    #[test]
    fn test_demo_round_places_stones() {
        let mut m = quick_match();
        let events = m.demo_round().unwrap();
        let placed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Placed { .. }))
            .count();
        assert_eq!(placed, 2);
        assert_eq!(m.engine().board().stone_count(), 2);
    }
}
