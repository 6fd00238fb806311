//! High score persistence

pub mod high_score;

pub use high_score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
