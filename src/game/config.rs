
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};

/// Configuration for the game, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Tick interval of a fresh game, in milliseconds
    pub initial_speed_ms: u64,
    /// How much the tick interval shrinks per speed-up
    pub speed_decrement_ms: u64,
    /// Floor for the tick interval; lower means faster
    pub min_speed_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_speed_ms: 150,
            speed_decrement_ms: 2,
            min_speed_ms: 50,
        }
    }
}

impl GameConfig {
    pub const MIN_GRID_SIZE: usize = 2;
    pub const MAX_GRID_SIZE: usize = 256;

    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < Self::MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                min: Self::MIN_GRID_SIZE,
                actual: self.grid_size,
            });
        }
        if self.grid_size > Self::MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                max: Self::MAX_GRID_SIZE,
                actual: self.grid_size,
            });
        }
        if self.initial_speed_ms == 0 || self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::MinSpeedAboveInitial {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }
        if self.speed_decrement_ms == 0 {
            return Err(ConfigError::ZeroDecrement);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_speed_ms, 150);
        assert_eq!(config.speed_decrement_ms, 2);
        assert_eq!(config.min_speed_ms, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.initial_speed_ms, 150);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert_eq!(
            GameConfig::new(1).validate(),
            Err(ConfigError::GridTooSmall { min: 2, actual: 1 })
        );
        assert!(matches!(
            GameConfig::new(1000).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));

        let zero_speed = GameConfig {
            min_speed_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_speed.validate(), Err(ConfigError::ZeroSpeed));

        let inverted = GameConfig {
            initial_speed_ms: 40,
            ..Default::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::MinSpeedAboveInitial {
                min_ms: 50,
                initial_ms: 40
            })
        );

        let no_decrement = GameConfig {
            speed_decrement_ms: 0,
            ..Default::default()
        };
        assert_eq!(no_decrement.validate(), Err(ConfigError::ZeroDecrement));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("grid_size = 12").unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.initial_speed_ms, 150);
    }
}
