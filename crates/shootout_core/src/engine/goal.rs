//! Goal frame geometry
//!
//! Lateral positions are goal-relative (0 = centre of the goal mouth,
//! negative = left). Bounds and resting points are absolute screen
//! coordinates with y growing downward.
//!
//! ## Buckets
//! The goal mouth is split into three lanes for keeper positioning:
//! - `Left`   : x < -width/4
//! - `Right`  : x >  width/4
//! - `Center` : everything in between

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;

/// Keeper lane, also used to bucket the ball's lateral position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeeperPosition {
    Left,
    #[default]
    Center,
    Right,
}

impl KeeperPosition {
    pub const ALL: [KeeperPosition; 3] =
        [KeeperPosition::Left, KeeperPosition::Center, KeeperPosition::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeeperPosition::Left => "left",
            KeeperPosition::Center => "center",
            KeeperPosition::Right => "right",
        }
    }
}

/// Goal-frame rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl GoalBounds {
    /// Inclusive on every edge: a ball resting on the post counts as in.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Resolved goal geometry for one screen size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalFrame {
    pub width: f32,
    pub height: f32,
    pub bounds: GoalBounds,
    /// Penalty spot (screen coordinates)
    pub ball_origin: (f32, f32),
    /// Vertical offset from the spot to the shot target (negative = upfield)
    pub shot_travel: f32,
}

impl Default for GoalFrame {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl GoalFrame {
    pub fn from_config(config: &EngineConfig) -> Self {
        let sw = config.screen_width;
        let sh = config.screen_height;
        let width = sw * config.goal_width_ratio;
        let height = sh * config.goal_height_ratio;
        let top = sh * config.goal_top_ratio;

        Self {
            width,
            height,
            bounds: GoalBounds {
                left: sw / 2.0 - width / 2.0,
                right: sw / 2.0 + width / 2.0,
                top,
                bottom: top + height,
            },
            ball_origin: (sw / 2.0, sh * config.ball_origin_ratio),
            shot_travel: -(sh * config.shot_travel_ratio),
        }
    }

    /// Keeper's lateral x when set in a lane
    pub fn keeper_x(&self, position: KeeperPosition) -> f32 {
        match position {
            KeeperPosition::Left => -self.width / 3.0,
            KeeperPosition::Center => 0.0,
            KeeperPosition::Right => self.width / 3.0,
        }
    }

    /// Lane containing a goal-relative lateral position
    pub fn bucket_for(&self, x: f32) -> KeeperPosition {
        let quarter = self.width / 4.0;
        if x < -quarter {
            KeeperPosition::Left
        } else if x > quarter {
            KeeperPosition::Right
        } else {
            KeeperPosition::Center
        }
    }

    /// Convert a goal-relative ball offset to absolute screen coordinates.
    pub fn to_screen(&self, dx: f32, dy: f32) -> (f32, f32) {
        (self.ball_origin.0 + dx, self.ball_origin.1 + dy)
    }
}
