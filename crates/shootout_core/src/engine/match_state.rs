//! # Match State Machine
//!
//! Tracks one shootout from the first kick to the final whistle.
//!
//! ## Phases
//! ```text
//! Aiming --shoot--> Shooting --complete_animation--> Result
//! Result --timer--> Aiming              (shots remaining)
//! Result --timer--> GameOver            (all shots taken)
//! GameOver --sudden-death timer--> Aiming   (tie, total_shots + 1)
//! GameOver --restart--> Aiming
//! ```
//!
//! ## Timers
//! The session never sleeps. Transitions that need a pause hand back a
//! [`ScheduledTimer`]; the host waits `delay_ms` and passes it to
//! [`MatchSession::fire`]. Every phase change bumps a generation counter, so
//! a timer captured before a restart or an earlier advance is ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::aim::{clamp_aim_to, TapTrigger};
use super::config::EngineConfig;
use super::goal::GoalFrame;
use super::keeper::{Difficulty, ShotResolver};
use super::rng::RandomSource;
use super::shot::{settle, BallFlight, ShotAttempt, ShotPlan, ShotRecord, ShotResult};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MatchPhase {
    #[default]
    Aiming,
    Shooting,
    Result,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerKind {
    /// Result banner expires
    ResultTimeout,
    /// Tie banner expires and the extra shot opens
    SuddenDeath,
}

/// Deferred callback request handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimer {
    pub token: u64,
    pub kind: TimerKind,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchOutcome {
    ShooterWins,
    KeeperWins,
    /// Level after all shots; a sudden-death shot follows
    Tie,
    /// Level with the sudden-death cap exhausted
    Drawn,
}

impl MatchOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchOutcome::Tie)
    }
}

/// Running tally derived from the shot history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub goals: u32,
    pub saves: u32,
    pub misses: u32,
}

impl Score {
    pub fn from_history(history: &[ShotRecord]) -> Self {
        history.iter().fold(Score::default(), |mut score, record| {
            match record.result {
                ShotResult::Goal => score.goals += 1,
                ShotResult::Saved => score.saves += 1,
                ShotResult::Missed => score.misses += 1,
            }
            score
        })
    }

    pub fn attempts(&self) -> u32 {
        self.goals + self.saves + self.misses
    }
}

/// Cross-match statistics, updated on restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub games_played: u32,
    pub consecutive_wins: u32,
    pub best_streak: u32,
}

/// Snapshot for display or export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub phase: MatchPhase,
    pub score: Score,
    pub total_shots: u32,
    pub outcome: Option<MatchOutcome>,
    pub message: String,
    pub history: Vec<ShotRecord>,
}

#[derive(Debug, Clone)]
pub struct MatchSession {
    config: EngineConfig,
    resolver: ShotResolver,
    difficulty: Difficulty,

    phase: MatchPhase,
    history: Vec<ShotRecord>,
    total_shots: u32,
    sudden_death_rounds: u32,
    aim_angle: f32,
    tap_trigger: TapTrigger,
    in_flight: Option<ShotPlan>,
    message: String,
    outcome: Option<MatchOutcome>,

    stats: SessionStats,
    generation: u64,
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::build(EngineConfig::default(), Difficulty::default())
    }
}

impl MatchSession {
    pub fn new(config: EngineConfig, difficulty: Difficulty) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, difficulty))
    }

    fn build(config: EngineConfig, difficulty: Difficulty) -> Self {
        let resolver = ShotResolver::new(GoalFrame::from_config(&config), config.aim_limit_deg);
        let total_shots = config.base_shots;
        let tap_trigger = TapTrigger::new(config.timers.double_tap_window_ms);
        Self {
            config,
            resolver,
            difficulty,
            phase: MatchPhase::Aiming,
            history: Vec::new(),
            total_shots,
            sudden_death_rounds: 0,
            aim_angle: 0.0,
            tap_trigger,
            in_flight: None,
            message: String::new(),
            outcome: None,
            stats: SessionStats::default(),
            generation: 0,
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn history(&self) -> &[ShotRecord] {
        &self.history
    }

    pub fn score(&self) -> Score {
        Score::from_history(&self.history)
    }

    pub fn total_shots(&self) -> u32 {
        self.total_shots
    }

    pub fn shots_remaining(&self) -> u32 {
        self.total_shots.saturating_sub(self.history.len() as u32)
    }

    pub fn aim_angle(&self) -> f32 {
        self.aim_angle
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn frame(&self) -> &GoalFrame {
        self.resolver.frame()
    }

    /// Shot currently animating, if any
    pub fn in_flight(&self) -> Option<&ShotPlan> {
        self.in_flight.as_ref()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            phase: self.phase,
            score: self.score(),
            total_shots: self.total_shots,
            outcome: self.outcome,
            message: self.message.clone(),
            history: self.history.clone(),
        }
    }

    /// Takes effect from the next shot.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    // ========================
    // Events
    // ========================

    /// Update the aim. Ignored outside `Aiming`.
    pub fn aim(&mut self, angle_deg: f32) -> bool {
        if self.phase != MatchPhase::Aiming {
            return false;
        }
        self.aim_angle = clamp_aim_to(angle_deg, self.config.aim_limit_deg);
        true
    }

    /// Commit the current aim. Returns the plan to animate, or `None` outside `Aiming`.
    pub fn shoot<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<ShotPlan> {
        if self.phase != MatchPhase::Aiming || self.history.len() as u32 >= self.total_shots {
            return None;
        }

        let attempt = ShotAttempt {
            aim_angle: self.aim_angle,
            attempt_index: self.history.len() as u32 + 1,
        };
        let decision = self.resolver.resolve(attempt.aim_angle, self.difficulty, rng);
        let frame = self.resolver.frame();
        let plan = ShotPlan {
            attempt,
            decision,
            keeper_target_x: decision.keeper_target_x(frame),
            flight: BallFlight::plan(&decision, frame),
        };

        self.in_flight = Some(plan);
        self.enter(MatchPhase::Shooting);
        Some(plan)
    }

    /// Register a screen tap at host time `now_ms`. A double tap shoots.
    pub fn tap<R: RandomSource + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Option<ShotPlan> {
        if self.phase != MatchPhase::Aiming {
            return None;
        }
        if self.tap_trigger.tap(now_ms) {
            self.shoot(rng)
        } else {
            None
        }
    }

    /// Ball animation finished: record the result and schedule the banner timeout.
    pub fn complete_animation(&mut self) -> Option<ScheduledTimer> {
        if self.phase != MatchPhase::Shooting {
            return None;
        }
        let plan = self.in_flight.take()?;
        let result = settle(&plan.decision, &plan.flight, self.resolver.frame());
        Some(self.finish_shot(plan.attempt, result))
    }

    /// Deliver a timer. Stale or out-of-phase timers are ignored.
    pub fn fire(&mut self, timer: ScheduledTimer) -> Option<ScheduledTimer> {
        if timer.token != self.generation {
            debug!(token = timer.token, current = self.generation, "stale timer ignored");
            return None;
        }

        match (timer.kind, self.phase) {
            (TimerKind::ResultTimeout, MatchPhase::Result) => {
                self.message.clear();
                if self.history.len() as u32 >= self.total_shots {
                    self.end_match()
                } else {
                    self.reset_for_next_shot();
                    None
                }
            }
            (TimerKind::SuddenDeath, MatchPhase::GameOver) => {
                self.total_shots += 1;
                self.sudden_death_rounds += 1;
                self.message.clear();
                self.outcome = None;
                info!(
                    round = self.sudden_death_rounds,
                    total_shots = self.total_shots,
                    "sudden death"
                );
                self.reset_for_next_shot();
                None
            }
            _ => None,
        }
    }

    /// Start a fresh match, folding the finished one into the session stats.
    /// Ignored until the match reaches `GameOver`.
    pub fn restart(&mut self) -> bool {
        if self.phase != MatchPhase::GameOver {
            return false;
        }
        let score = self.score();
        let won = score.goals > score.saves;

        self.stats.games_played += 1;
        if won {
            self.stats.consecutive_wins += 1;
            self.stats.best_streak = self.stats.best_streak.max(self.stats.consecutive_wins);
        } else {
            self.stats.consecutive_wins = 0;
        }

        info!(
            won,
            goals = score.goals,
            saves = score.saves,
            games_played = self.stats.games_played,
            consecutive_wins = self.stats.consecutive_wins,
            "match restarted"
        );

        self.history.clear();
        self.total_shots = self.config.base_shots;
        self.sudden_death_rounds = 0;
        self.message.clear();
        self.outcome = None;
        self.reset_for_next_shot();
        true
    }

    /// Headless driver: aim, shoot, land and fire every timer at once.
    ///
    /// Returns the recorded shot, or `None` when no shot could be taken.
    pub fn kick<R: RandomSource + ?Sized>(
        &mut self,
        angle_deg: f32,
        rng: &mut R,
    ) -> Option<ShotRecord> {
        self.aim(angle_deg);
        self.shoot(rng)?;
        let mut timer = self.complete_animation();
        let record = self.history.last().copied();
        while let Some(t) = timer {
            timer = self.fire(t);
        }
        record
    }

    // ========================
    // Internals
    // ========================

    fn finish_shot(&mut self, attempt: ShotAttempt, result: ShotResult) -> ScheduledTimer {
        self.history.push(ShotRecord { result, attempt });
        self.message = result.message().to_string();

        debug!(
            attempt = attempt.attempt_index,
            aim = attempt.aim_angle,
            result = result.message(),
            "shot recorded"
        );

        self.enter(MatchPhase::Result);
        let delay_ms = match result {
            ShotResult::Saved => self.config.timers.saved_result_ms,
            ShotResult::Goal | ShotResult::Missed => self.config.timers.scored_result_ms,
        };
        self.schedule(TimerKind::ResultTimeout, delay_ms)
    }

    fn end_match(&mut self) -> Option<ScheduledTimer> {
        let score = self.score();
        let cap_reached = self
            .config
            .sudden_death_cap
            .is_some_and(|cap| self.sudden_death_rounds >= cap);

        let outcome = decide_outcome(score, cap_reached);
        self.message = final_message(outcome, score);
        self.outcome = Some(outcome);
        self.enter(MatchPhase::GameOver);

        info!(
            goals = score.goals,
            saves = score.saves,
            misses = score.misses,
            outcome = ?outcome,
            "match over"
        );

        match outcome {
            MatchOutcome::Tie => {
                Some(self.schedule(TimerKind::SuddenDeath, self.config.timers.sudden_death_ms))
            }
            _ => None,
        }
    }

    fn reset_for_next_shot(&mut self) {
        self.aim_angle = 0.0;
        self.tap_trigger.reset();
        self.in_flight = None;
        self.enter(MatchPhase::Aiming);
    }

    fn enter(&mut self, phase: MatchPhase) {
        self.phase = phase;
        self.generation += 1;
    }

    fn schedule(&self, kind: TimerKind, delay_ms: u64) -> ScheduledTimer {
        ScheduledTimer { token: self.generation, kind, delay_ms }
    }
}

/// End-of-match rule: goals against saves, misses do not count for either side.
pub fn decide_outcome(score: Score, sudden_death_exhausted: bool) -> MatchOutcome {
    use std::cmp::Ordering;

    match score.goals.cmp(&score.saves) {
        Ordering::Greater => MatchOutcome::ShooterWins,
        Ordering::Less => MatchOutcome::KeeperWins,
        Ordering::Equal if sudden_death_exhausted => MatchOutcome::Drawn,
        Ordering::Equal => MatchOutcome::Tie,
    }
}

pub fn final_message(outcome: MatchOutcome, score: Score) -> String {
    let (g, s) = (score.goals, score.saves);
    match outcome {
        MatchOutcome::ShooterWins => format!("YOU WIN! {g} GOALS vs {s} SAVES!"),
        MatchOutcome::KeeperWins => format!("KEEPER WINS! {s} SAVES vs {g} GOALS"),
        MatchOutcome::Tie => format!("TIE GAME! {g}-{s} - SUDDEN DEATH!"),
        MatchOutcome::Drawn => format!("TIE GAME! {g}-{s}"),
    }
}
