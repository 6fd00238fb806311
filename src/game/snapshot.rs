use serde::{Deserialize, Serialize};

use super::{
    engine::GameEngine,
    state::{Phase, Position},
};

/// Read-only view of a game handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub speed_ms: u64,
    pub paused: bool,
    pub over: bool,
    pub phase: Phase,
    pub grid_size: usize,
}

impl Snapshot {
    pub fn capture<R: rand::Rng>(engine: &GameEngine<R>, high_score: u32) -> Self {
        let state = engine.state();
        Self {
            snake: state.snake.segments().collect(),
            food: state.food,
            score: state.score,
            high_score,
            speed_ms: state.speed_ms,
            paused: state.paused,
            over: state.over,
            phase: engine.phase(),
            grid_size: engine.grid().dimension(),
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
