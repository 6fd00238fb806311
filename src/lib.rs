//! Grid Snake - a terminal Snake game built around a tick-driven core
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - A generation-checked tick scheduler (scheduler module)
//! - High score persistence (storage module)
//! - The controller tying engine, scheduler and store together (session module)
//! - TUI rendering, keyboard input and the interactive mode (render, input, modes)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod storage;
