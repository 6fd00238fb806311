use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Grid must be at least {min} cells per side, got {actual}")]
    GridTooSmall { min: usize, actual: usize },
    #[error("Grid must be at most {max} cells per side, got {actual}")]
    GridTooLarge { max: usize, actual: usize },
    #[error("Tick interval must be positive")]
    ZeroSpeed,
    #[error("Minimum tick interval {min_ms}ms exceeds initial interval {initial_ms}ms")]
    MinSpeedAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("Speed decrement must be positive")]
    ZeroDecrement,
}

/// Why a game state was refused by [`GameEngine::try_load`](super::GameEngine::try_load)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("Snake segment ({x}, {y}) is off the grid")]
    SnakeOutOfBounds { x: i32, y: i32 },
    #[error("Snake overlaps itself at ({x}, {y})")]
    SnakeOverlaps { x: i32, y: i32 },
    #[error("Food at ({x}, {y}) is off the grid or under the snake")]
    FoodMisplaced { x: i32, y: i32 },
    #[error("Food may only be missing once the game is over")]
    MissingFood,
    #[error("Score {0} is not a multiple of the food reward")]
    UnevenScore(u32),
    #[error("Tick interval {speed_ms}ms is outside {min_ms}..={initial_ms}ms")]
    SpeedOutOfRange {
        speed_ms: u64,
        min_ms: u64,
        initial_ms: u64,
    },
}

pub type Result<T, E = ConfigError> = core::result::Result<T, E>;
