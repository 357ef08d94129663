//! # shootout_core - Penalty Shootout Engine
//!
//! Decides every kick of a penalty shootout before it is animated and runs
//! the match flow around it.
//!
//! ## Features
//! - Guaranteed-outcome keeper AI: the save is committed before the ball moves
//! - Seeded randomness (same seed = same shootout)
//! - Match state machine with sudden death and stale-timer protection
//! - Lenient persisted settings (corrupted data falls back to defaults)
//!
//! ```rust
//! use shootout_core::{Difficulty, EngineConfig, MatchSession, SeededRandom};
//!
//! let mut session = MatchSession::new(EngineConfig::default(), Difficulty::Medium).unwrap();
//! let mut rng = SeededRandom::new(42);
//! while session.kick(25.0, &mut rng).is_some() {}
//! assert!(session.outcome().is_some());
//! ```

pub mod engine;
pub mod error;
pub mod save;

pub use engine::{
    Difficulty, EngineConfig, KeeperDecision, KeeperPosition, MatchOutcome, MatchPhase,
    MatchSession, MatchSummary, RandomSource, ScheduledTimer, SeededRandom, ShotPlan,
    ShotRecord, ShotResult,
};
pub use error::{ConfigError, Result};
pub use save::{FileStore, GameSettings, MemoryStore, SettingsError, SettingsManager, ViewMode};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
