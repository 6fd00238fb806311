//! Runtime settings
//!
//! Settings come from an optional TOML file and are then overridden by
//! command line flags. The resulting [`GameConfig`] is validated once here and
//! stays fixed for the rest of the run.

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::GameConfig;

const APP_DIR: &str = "grid_snake";
const HIGH_SCORE_FILE: &str = "high_score.json";
const FALLBACK_HIGH_SCORE_FILE: &str = "grid_snake_high_score.json";

/// Contents of a settings TOML file
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub game: GameConfig,
    pub high_score_file: Option<PathBuf>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }
}

/// Command line overrides; anything left unset falls back to the file or defaults
#[derive(Debug, Default, Clone, Args)]
pub struct Overrides {
    /// Cells per side of the square grid
    #[arg(long)]
    pub grid_size: Option<usize>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    pub initial_speed: Option<u64>,

    /// Milliseconds removed from the tick interval at each speed-up
    #[arg(long)]
    pub speed_decrement: Option<u64>,

    /// Fastest allowed tick interval in milliseconds
    #[arg(long)]
    pub min_speed: Option<u64>,

    /// Where the best score is kept
    #[arg(long)]
    pub high_score_file: Option<PathBuf>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub game: GameConfig,
    pub high_score_file: PathBuf,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn resolve(file: Option<SettingsFile>, overrides: Overrides) -> Result<Self> {
        let file = file.unwrap_or_default();
        let mut game = file.game;

        if let Some(grid_size) = overrides.grid_size {
            game.grid_size = grid_size;
        }
        if let Some(initial_speed) = overrides.initial_speed {
            game.initial_speed_ms = initial_speed;
        }
        if let Some(speed_decrement) = overrides.speed_decrement {
            game.speed_decrement_ms = speed_decrement;
        }
        if let Some(min_speed) = overrides.min_speed {
            game.min_speed_ms = min_speed;
        }
        game.validate().context("Invalid game settings")?;

        let high_score_file = overrides
            .high_score_file
            .or(file.high_score_file)
            .unwrap_or_else(default_high_score_path);

        Ok(Self {
            game,
            high_score_file,
            seed: overrides.seed,
        })
    }
}

/// `<data dir>/grid_snake/high_score.json`, or a file in the working directory
pub fn default_high_score_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(HIGH_SCORE_FILE))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_HIGH_SCORE_FILE))
}
