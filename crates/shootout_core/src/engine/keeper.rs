//! Goalkeeper decision
//!
//! The keeper commits before the ball moves. One uniform draw against the
//! difficulty's save probability decides the save; the dive direction then
//! follows from that decision so the animation can never contradict it.
//!
//! - Save: dive to the lane the ball is heading for.
//! - No save: dive to a lane that cannot reach the ball.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aim::clamp_aim_to;
use super::goal::{GoalFrame, KeeperPosition};
use super::rng::RandomSource;

/// Lateral spread of a shot relative to goal width at full sine
pub const SHOT_SPREAD: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Chance that the keeper commits to a save
    pub fn save_probability(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.45,
            Difficulty::Medium => 0.66,
            Difficulty::Hard => 0.75,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Keeper's committed plan for one shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeeperDecision {
    pub will_block: bool,
    pub target_position: KeeperPosition,
    /// Goal-relative lateral position the ball is heading for
    pub predicted_ball_x: f32,
}

impl KeeperDecision {
    /// Where the keeper sprite should end up laterally.
    pub fn keeper_target_x(&self, frame: &GoalFrame) -> f32 {
        if self.will_block {
            self.predicted_ball_x
        } else {
            frame.keeper_x(self.target_position)
        }
    }
}

/// Pure decision phase of a shot
#[derive(Debug, Clone, Copy)]
pub struct ShotResolver {
    frame: GoalFrame,
    aim_limit_deg: f32,
}

impl ShotResolver {
    pub fn new(frame: GoalFrame, aim_limit_deg: f32) -> Self {
        Self { frame, aim_limit_deg }
    }

    pub fn frame(&self) -> &GoalFrame {
        &self.frame
    }

    /// Lateral landing point for an aim angle
    pub fn predicted_ball_x(&self, aim_angle_deg: f32) -> f32 {
        let angle = clamp_aim_to(aim_angle_deg, self.aim_limit_deg);
        angle.to_radians().sin() * self.frame.width * SHOT_SPREAD
    }

    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        aim_angle_deg: f32,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> KeeperDecision {
        let predicted_ball_x = self.predicted_ball_x(aim_angle_deg);
        let will_block = rng.next_unit() < difficulty.save_probability();

        let target_position = if will_block {
            self.frame.bucket_for(predicted_ball_x)
        } else {
            self.wrong_way(predicted_ball_x, rng)
        };

        debug!(
            aim = aim_angle_deg,
            predicted_x = predicted_ball_x,
            will_block,
            target = target_position.as_str(),
            difficulty = difficulty.as_str(),
            "keeper decision"
        );

        KeeperDecision { will_block, target_position, predicted_ball_x }
    }

    /// Pick a lane that misses the ball.
    ///
    /// Candidates must be more than a third of the goal away from the ball and
    /// outside the ball's own lane. With no candidate, go opposite the shot side.
    fn wrong_way<R: RandomSource + ?Sized>(&self, predicted_x: f32, rng: &mut R) -> KeeperPosition {
        let ball_lane = self.frame.bucket_for(predicted_x);
        let reach = self.frame.width / 3.0;

        let candidates: Vec<KeeperPosition> = KeeperPosition::ALL
            .into_iter()
            .filter(|&pos| pos != ball_lane)
            .filter(|&pos| (self.frame.keeper_x(pos) - predicted_x).abs() > reach)
            .collect();

        if candidates.is_empty() {
            return if predicted_x >= 0.0 { KeeperPosition::Left } else { KeeperPosition::Right };
        }

        candidates[rng.next_index(candidates.len())]
    }
}

impl Default for ShotResolver {
    fn default() -> Self {
        Self::new(GoalFrame::default(), super::aim::AIM_LIMIT_DEG)
    }
}
