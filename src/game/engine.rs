use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{
    action::{Command, Direction},
    config::GameConfig,
    error::{Result, StateError},
    food::place_food,
    grid::Grid,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// Points awarded per food eaten
pub const POINTS_PER_FOOD: u32 = 10;

/// The game speeds up whenever the score lands on a multiple of this
pub const SPEED_UP_EVERY: u32 = 100;

/// Direction of a freshly started snake
pub const START_DIRECTION: Direction = Direction::Right;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake covers every cell, so no food can be placed
    BoardFull,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened: the game is idle, paused or over
    Skipped,
    /// The snake moved one cell without eating
    Moved,
    /// The snake ate and grew; `speed_changed` means the tick interval shrank
    Ate { speed_changed: bool },
    /// The game just ended on this tick
    GameOver { reason: EndReason, final_score: u32 },
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Skipped)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver { .. })
    }
}

/// The game engine that handles all game logic
///
/// The engine owns exactly one [`GameState`]. Nothing mutates it except
/// [`start`](Self::start), [`tick`](Self::tick), the direction and pause
/// commands and the validated [`try_load`](Self::try_load), so callers are
/// free to read it between ticks.
#[derive(Debug)]
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    state: GameState,
    started: bool,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_size);
        let state = Self::fresh_state(&config, grid, &mut rng);

        Ok(Self {
            config,
            grid,
            rng,
            state,
            started: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::Idle
        } else if self.state.over {
            Phase::Over
        } else if self.state.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    /// Current tick interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    /// Reset to a brand new game and return the tick interval to run it at
    pub fn start(&mut self) -> Duration {
        self.state = Self::fresh_state(&self.config, self.grid, &mut self.rng);
        self.started = true;
        self.tick_interval()
    }

    /// Replace the running game with `state`
    ///
    /// The state is checked against the rules a played game always obeys:
    /// the body stays on the grid without overlapping, food sits on a free
    /// cell, the score is a whole number of meals and the speed lies between
    /// the configured floor and start. Anything else is refused and the
    /// current game is left untouched.
    pub fn try_load(&mut self, state: GameState) -> Result<(), StateError> {
        self.check_state(&state)?;
        self.state = state;
        self.started = true;
        Ok(())
    }

    /// Turn the snake. Returns whether the direction changed.
    ///
    /// Reversing straight into the neck is ignored, as is any turn once
    /// the game is over.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.started || self.state.over {
            return false;
        }
        if self.state.direction == direction || self.state.direction.is_opposite(direction) {
            return false;
        }
        self.state.direction = direction;
        true
    }

    /// Flip the pause flag. Returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.state.over {
            return false;
        }
        self.state.paused = !self.state.paused;
        true
    }

    /// Apply an input command. Returns whether visible state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                self.start();
                true
            }
            Command::TogglePause => self.toggle_pause(),
            Command::SetDirection(direction) => self.set_direction(direction),
        }
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.started || self.state.paused || self.state.over {
            return TickOutcome::Skipped;
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        // Checked against the body before it moves, tail included
        if let Some(collision) = self.check_collision(new_head) {
            return self.end_game(EndReason::Collision(collision));
        }

        self.state.snake.push_head(new_head);

        if self.state.food != Some(new_head) {
            self.state.snake.drop_tail();
            return TickOutcome::Moved;
        }

        self.state.score += POINTS_PER_FOOD;
        self.state.food = place_food(&self.state.snake, self.grid, &mut self.rng);
        if self.state.food.is_none() {
            return self.end_game(EndReason::BoardFull);
        }

        TickOutcome::Ate {
            speed_changed: self.speed_up(),
        }
    }

    fn check_state(&self, state: &GameState) -> Result<(), StateError> {
        let mut seen = HashSet::with_capacity(state.snake.len());
        for cell in state.snake.segments() {
            if !self.grid.in_bounds(cell) {
                return Err(StateError::SnakeOutOfBounds {
                    x: cell.x,
                    y: cell.y,
                });
            }
            if !seen.insert(cell) {
                return Err(StateError::SnakeOverlaps {
                    x: cell.x,
                    y: cell.y,
                });
            }
        }

        match state.food {
            Some(food) if !self.grid.in_bounds(food) || state.snake.occupies(food) => {
                return Err(StateError::FoodMisplaced {
                    x: food.x,
                    y: food.y,
                });
            }
            None if !state.over => return Err(StateError::MissingFood),
            _ => {}
        }

        if state.score % POINTS_PER_FOOD != 0 {
            return Err(StateError::UnevenScore(state.score));
        }

        let (min_ms, initial_ms) = (self.config.min_speed_ms, self.config.initial_speed_ms);
        if !(min_ms..=initial_ms).contains(&state.speed_ms) {
            return Err(StateError::SpeedOutOfRange {
                speed_ms: state.speed_ms,
                min_ms,
                initial_ms,
            });
        }

        Ok(())
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.grid.in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Shrink the tick interval on a score milestone. Never goes under the floor.
    fn speed_up(&mut self) -> bool {
        let state = &mut self.state;
        if state.score % SPEED_UP_EVERY != 0 || state.speed_ms <= self.config.min_speed_ms {
            return false;
        }

        match state.speed_ms.checked_sub(self.config.speed_decrement_ms) {
            Some(next) if next >= self.config.min_speed_ms => {
                state.speed_ms = next;
                true
            }
            _ => false,
        }
    }

    fn end_game(&mut self, reason: EndReason) -> TickOutcome {
        self.state.over = true;
        TickOutcome::GameOver {
            reason,
            final_score: self.state.score,
        }
    }

    fn fresh_state(config: &GameConfig, grid: Grid, rng: &mut R) -> GameState {
        let snake = Snake::new(grid.center());
        let food = place_food(&snake, grid, rng);
        GameState::new(snake, food, START_DIRECTION, config.initial_speed_ms)
    }
}
