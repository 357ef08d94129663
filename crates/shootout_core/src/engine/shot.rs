//! Shot records and outcome classification
//!
//! A shot is decided before anything animates: [`ShotPlan`] bundles the
//! immutable attempt, the keeper's decision and the ball flight the host
//! should play. Once the flight lands, [`classify`] turns the resting point
//! into a [`ShotResult`].

use serde::{Deserialize, Serialize};

use super::goal::{GoalBounds, GoalFrame};
use super::keeper::KeeperDecision;

/// Fraction of the full trajectory the ball covers before the keeper stops it
const BLOCKED_TRAVEL: f32 = 0.6;

/// One committed kick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotAttempt {
    /// Degrees from straight ahead, already clamped
    pub aim_angle: f32,
    /// 1-based position in the match
    pub attempt_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Goal,
    Saved,
    Missed,
}

impl ShotResult {
    /// Banner shown while the result is on screen
    pub fn message(&self) -> &'static str {
        match self {
            ShotResult::Goal => "GOOOAL!",
            ShotResult::Saved => "SAVED!",
            ShotResult::Missed => "WIDE!",
        }
    }
}

/// History entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub result: ShotResult,
    pub attempt: ShotAttempt,
}

/// Ball animation target, relative to the penalty spot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallFlight {
    pub end_dx: f32,
    pub end_dy: f32,
    /// Sprite scale at the end of the flight (perspective)
    pub end_scale: f32,
    pub duration_ms: u64,
}

impl BallFlight {
    pub fn plan(decision: &KeeperDecision, frame: &GoalFrame) -> Self {
        if decision.will_block {
            Self {
                end_dx: decision.predicted_ball_x * BLOCKED_TRAVEL,
                end_dy: frame.shot_travel * BLOCKED_TRAVEL,
                end_scale: 0.7,
                duration_ms: 500,
            }
        } else {
            Self {
                end_dx: decision.predicted_ball_x,
                end_dy: frame.shot_travel,
                end_scale: 0.5,
                duration_ms: 800,
            }
        }
    }

    /// Absolute screen coordinates where the ball comes to rest.
    pub fn resting_point(&self, frame: &GoalFrame) -> (f32, f32) {
        frame.to_screen(self.end_dx, self.end_dy)
    }
}

/// Everything the presentation layer needs to animate one shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPlan {
    pub attempt: ShotAttempt,
    pub decision: KeeperDecision,
    pub keeper_target_x: f32,
    pub flight: BallFlight,
}

/// Goal-frame rectangle test for an unblocked ball.
pub fn classify(final_ball_x: f32, final_ball_y: f32, bounds: &GoalBounds) -> ShotResult {
    if bounds.contains(final_ball_x, final_ball_y) {
        ShotResult::Goal
    } else {
        ShotResult::Missed
    }
}

/// Final result of a planned shot. A committed save is always `Saved`.
pub fn settle(decision: &KeeperDecision, flight: &BallFlight, frame: &GoalFrame) -> ShotResult {
    if decision.will_block {
        return ShotResult::Saved;
    }
    let (x, y) = flight.resting_point(frame);
    classify(x, y, &frame.bounds)
}
