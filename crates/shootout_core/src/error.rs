use thiserror::Error;

/// Engine configuration rejected by [`crate::engine::config::EngineConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid screen size: {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },

    #[error("Ratio `{name}` out of range: {value}")]
    RatioOutOfRange { name: &'static str, value: f32 },

    #[error("Aim limit must be within (0, 90) degrees, got {0}")]
    InvalidAimLimit(f32),

    #[error("Base shot count must be at least 1")]
    NoShots,

    #[error("Goal frame does not fit on screen (top {top}, bottom {bottom}, height {height})")]
    GoalOffScreen { top: f32, bottom: f32, height: f32 },

    #[error("Config parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
