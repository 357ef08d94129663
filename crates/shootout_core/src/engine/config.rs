//! # Engine Configuration
//!
//! Every tuning constant of the shootout lives here: screen-relative goal
//! geometry, the aim limit, the shot count and the result/sudden-death timers.
//!
//! ```rust
//! use shootout_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.base_shots, 5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Shootout engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Screen ===
    /// Logical screen width (default: 390)
    pub screen_width: f32,
    /// Logical screen height (default: 844)
    pub screen_height: f32,

    // === Goal frame (fractions of the screen) ===
    /// Goal width / screen width (default: 0.8)
    pub goal_width_ratio: f32,
    /// Goal height / screen height (default: 0.35)
    pub goal_height_ratio: f32,
    /// Crossbar y / screen height (default: 0.3)
    pub goal_top_ratio: f32,
    /// Penalty spot y / screen height (default: 0.7)
    pub ball_origin_ratio: f32,
    /// Vertical ball travel / screen height (default: 0.3)
    pub shot_travel_ratio: f32,

    // === Rules ===
    /// Maximum absolute aim angle in degrees (default: 60)
    pub aim_limit_deg: f32,
    /// Regulation shots per match (default: 5)
    pub base_shots: u32,
    /// Maximum sudden-death rounds; `None` keeps extending until the tie breaks
    pub sudden_death_cap: Option<u32>,

    pub timers: TimerConfig,
}

/// Delays the host must honor between phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// How long "SAVED!" stays up (default: 2000)
    pub saved_result_ms: u64,
    /// How long "GOOOAL!" / "WIDE!" stays up (default: 1500)
    pub scored_result_ms: u64,
    /// Pause between a tie message and the extra shot (default: 2000)
    pub sudden_death_ms: u64,
    /// Window for the second tap of a double-tap shot (default: 500)
    pub double_tap_window_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            saved_result_ms: 2000,
            scored_result_ms: 1500,
            sudden_death_ms: 2000,
            double_tap_window_ms: 500,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_width: 390.0,
            screen_height: 844.0,

            goal_width_ratio: 0.8,
            goal_height_ratio: 0.35,
            goal_top_ratio: 0.3,
            ball_origin_ratio: 0.7,
            shot_travel_ratio: 0.3,

            aim_limit_deg: 60.0,
            base_shots: 5,
            sudden_death_cap: None,

            timers: TimerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Small square screen with zero delays, handy for tests and headless runs
    pub fn compact() -> Self {
        Self {
            screen_width: 100.0,
            screen_height: 100.0,
            timers: TimerConfig {
                saved_result_ms: 0,
                scored_result_ms: 0,
                sudden_death_ms: 0,
                double_tap_window_ms: 500,
            },
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let screen_ok = |v: f32| v.is_finite() && v > 0.0;
        if !screen_ok(self.screen_width) || !screen_ok(self.screen_height) {
            return Err(ConfigError::InvalidScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        for (name, value) in [
            ("goal_width_ratio", self.goal_width_ratio),
            ("goal_height_ratio", self.goal_height_ratio),
            ("goal_top_ratio", self.goal_top_ratio),
            ("ball_origin_ratio", self.ball_origin_ratio),
            ("shot_travel_ratio", self.shot_travel_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RatioOutOfRange { name, value });
            }
        }

        if !(self.aim_limit_deg > 0.0 && self.aim_limit_deg < 90.0) {
            return Err(ConfigError::InvalidAimLimit(self.aim_limit_deg));
        }

        if self.base_shots == 0 {
            return Err(ConfigError::NoShots);
        }

        let top = self.screen_height * self.goal_top_ratio;
        let bottom = top + self.screen_height * self.goal_height_ratio;
        if bottom > self.screen_height {
            return Err(ConfigError::GoalOffScreen { top, bottom, height: self.screen_height });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::compact().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{"base_shots": 3, "timers": {"saved_result_ms": 10}}"#)
            .unwrap();
        assert_eq!(config.base_shots, 3);
        assert_eq!(config.timers.saved_result_ms, 10);
        assert_eq!(config.timers.scored_result_ms, 1500);
        assert_eq!(config.goal_width_ratio, 0.8);
    }

    #[test]
    fn test_rejects_zero_shots() {
        let config = EngineConfig { base_shots: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoShots));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let config = EngineConfig { goal_width_ratio: 1.5, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RatioOutOfRange { name: "goal_width_ratio", .. })
        ));
    }

    #[test]
    fn test_rejects_goal_below_screen() {
        let config = EngineConfig { goal_top_ratio: 0.8, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::GoalOffScreen { .. })));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(EngineConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
    }
}
