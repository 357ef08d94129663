//! Aim input handling
//!
//! Gesture capture lives in the host. This module only turns raw gesture
//! numbers into a legal aim angle and detects the double-tap that commits a
//! shot. Out-of-range input is clamped, never rejected.

/// Default maximum absolute aim angle (degrees)
pub const AIM_LIMIT_DEG: f32 = 60.0;

/// Amplitude of the idle arrow sweep (degrees)
const SWEEP_AMPLITUDE_DEG: f32 = 30.0;
/// Sweep period divisor (ms per radian)
const SWEEP_MS_PER_RAD: f32 = 500.0;

/// Clamp to `[-limit, limit]`. NaN maps to straight ahead.
pub fn clamp_aim_to(angle_deg: f32, limit_deg: f32) -> f32 {
    if angle_deg.is_nan() {
        return 0.0;
    }
    angle_deg.clamp(-limit_deg, limit_deg)
}

pub fn clamp_aim(angle_deg: f32) -> f32 {
    clamp_aim_to(angle_deg, AIM_LIMIT_DEG)
}

/// Aim angle from a drag vector in screen space (y grows downward).
pub fn angle_from_drag(dx: f32, dy: f32) -> f32 {
    clamp_aim((-dy).atan2(dx).to_degrees())
}

/// Arrow angle while the player is idle in the aiming phase.
pub fn sweep_angle(elapsed_ms: u64) -> f32 {
    (elapsed_ms as f32 / SWEEP_MS_PER_RAD).sin() * SWEEP_AMPLITUDE_DEG
}

/// Double-tap shot trigger.
///
/// Timestamps come from the host clock in milliseconds. A second tap inside
/// the window fires; a late second tap starts a new sequence.
#[derive(Debug, Clone)]
pub struct TapTrigger {
    window_ms: u64,
    first_tap_at: Option<u64>,
}

impl TapTrigger {
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms, first_tap_at: None }
    }

    /// Register a tap; returns `true` when the shot should fire.
    pub fn tap(&mut self, now_ms: u64) -> bool {
        match self.first_tap_at {
            Some(first) if now_ms.saturating_sub(first) <= self.window_ms => {
                self.first_tap_at = None;
                true
            }
            _ => {
                self.first_tap_at = Some(now_ms);
                false
            }
        }
    }

    pub fn is_pending(&self, now_ms: u64) -> bool {
        self.first_tap_at.is_some_and(|first| now_ms.saturating_sub(first) <= self.window_ms)
    }

    pub fn reset(&mut self) {
        self.first_tap_at = None;
    }
}
