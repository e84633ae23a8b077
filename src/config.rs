use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{FRAMES_PER_SECOND, GHOST_EXTENT, PLAYER_EXTENT, TILE_SIZE};
use crate::error::GameError;
use crate::types::SpriteExtent;

/// Session settings as read from `config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    pub map: PathBuf,
    pub lives: i32,
    pub speed: i32,
    #[serde(rename = "frightenedLength")]
    pub frightened_length: u64,
    #[serde(rename = "modeLengths")]
    pub mode_lengths: Vec<u64>,
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|error| {
            GameError::config(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|error| GameError::config(format!("invalid config json: {error}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.lives < 0 {
            return Err(GameError::config("lives must not be negative"));
        }
        if self.speed <= 0 {
            return Err(GameError::config("speed must be positive"));
        }
        // Agents turn only on exact tile centers and move at most one tile per step.
        if TILE_SIZE % self.speed != 0 {
            return Err(GameError::config(format!(
                "speed {} does not divide the tile size ({TILE_SIZE})",
                self.speed
            )));
        }
        if self.mode_lengths.is_empty() {
            return Err(GameError::config("modeLengths must not be empty"));
        }
        if self.mode_lengths.contains(&0) {
            return Err(GameError::config("modeLengths entries must be positive"));
        }
        Ok(())
    }

    /// Resolves the map path against the directory holding the config file.
    pub fn map_path_relative_to(&self, config_path: &Path) -> PathBuf {
        if self.map.is_absolute() {
            return self.map.clone();
        }
        config_path
            .parent()
            .map(|dir| dir.join(&self.map))
            .unwrap_or_else(|| self.map.clone())
    }
}

#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Seed for frightened pathing; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub player_extent: SpriteExtent,
    pub ghost_extent: SpriteExtent,
    pub frames_per_second: u64,
    pub debug: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            player_extent: PLAYER_EXTENT,
            ghost_extent: GHOST_EXTENT,
            frames_per_second: FRAMES_PER_SECOND,
            debug: false,
        }
    }
}
