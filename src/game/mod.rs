//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timers or
//! rendering dependencies, so it can be driven and tested by feeding it
//! commands and ticks directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{EndReason, GameEngine, POINTS_PER_FOOD, SPEED_UP_EVERY, TickOutcome};
pub use error::{ConfigError, StateError};
pub use food::place_food;
pub use grid::Grid;
pub use snapshot::Snapshot;
pub use state::{CollisionType, GameState, Phase, Position, Snake};
