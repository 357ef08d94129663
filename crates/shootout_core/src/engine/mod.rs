//! Shootout engine: decision phase (keeper + shot) and match flow.

pub mod aim;
pub mod config;
pub mod goal;
pub mod keeper;
pub mod match_state;
pub mod rng;
pub mod shot;

pub use aim::{angle_from_drag, clamp_aim, sweep_angle, TapTrigger};
pub use config::{EngineConfig, TimerConfig};
pub use goal::{GoalBounds, GoalFrame, KeeperPosition};
pub use keeper::{Difficulty, KeeperDecision, ShotResolver};
pub use match_state::{
    MatchOutcome, MatchPhase, MatchSession, MatchSummary, ScheduledTimer, Score, SessionStats,
    TimerKind,
};
pub use rng::{EntropyRandom, RandomSource, SeededRandom};
pub use shot::{classify, BallFlight, ShotAttempt, ShotPlan, ShotRecord, ShotResult};
