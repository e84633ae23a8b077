use thiserror::Error;

/// Errors raised while building or querying a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("map format error: {reason}")]
    MapFormat { reason: String },

    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("config error: {reason}")]
    Config { reason: String },
}

impl GameError {
    pub fn map_format(reason: impl Into<String>) -> Self {
        Self::MapFormat {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
