//! Game state and core simulation types
//!
//! One [`Game`] exists per process. It owns the physics world for the current
//! round and rebuilds it wholesale on reset.

use serde::Serialize;

use super::score::{ScoreDisplay, Scoreboard};
use super::stability::StabilityHistory;
use crate::physics::SceneBuilder;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Intro,
    /// Tower is live and scoring
    Playing,
    /// Tower stopped moving
    StableLost,
    /// Everything fell below the baseline after scoring
    NoObjectsLost,
}

impl GamePhase {
    pub fn is_lost(self) -> bool {
        matches!(self, GamePhase::StableLost | GamePhase::NoObjectsLost)
    }
}

/// A flag that can be set but never cleared
///
/// The only way back to unset is replacing it with `Latch::default()`, which
/// [`Game`] does on round reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch(bool);

impl Latch {
    pub fn set(&mut self) {
        self.0 = true;
    }

    pub fn is_set(self) -> bool {
        self.0
    }
}

/// Per-round end conditions
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundLatches {
    pub stable: Latch,
    pub lost: Latch,
}

impl RoundLatches {
    pub fn round_over(&self) -> bool {
        self.stable.is_set() || self.lost.is_set()
    }
}

/// Pointer tracking for platform steering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerControl {
    pub last_pointer_x: i32,
    /// Becomes true once the pointer reads non-zero
    pub pointer_initialized: bool,
}

/// Read-only snapshot for painting the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudView {
    pub phase: GamePhase,
    pub score: ScoreDisplay,
    pub best: ScoreDisplay,
    pub stable: bool,
    pub lost: bool,
    /// Y of the measured upper point line
    pub upper_line: f32,
    pub baseline: f32,
}

/// The whole game
pub struct Game<B: SceneBuilder> {
    pub(crate) settings: Settings,
    pub(crate) builder: B,
    pub(crate) world: B::World,
    pub(crate) phase: GamePhase,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) stability: StabilityHistory,
    pub(crate) control: PlayerControl,
    pub(crate) latches: RoundLatches,
    /// Measured by the last render, consumed by the next tick
    pub(crate) pending_upper_point: Option<f32>,
    pub(crate) upper_line: f32,
}

impl<B: SceneBuilder> Game<B> {
    /// New game on the title screen with the first tower already built
    pub fn new(settings: Settings, mut builder: B) -> Self {
        let world = builder.build();
        let stability = fresh_history(&settings);
        let upper_line = settings.screen_height;
        Self {
            settings,
            builder,
            world,
            phase: GamePhase::Intro,
            scoreboard: Scoreboard::new(),
            stability,
            control: PlayerControl::default(),
            latches: RoundLatches::default(),
            pending_upper_point: None,
            upper_line,
        }
    }

    /// Leave the title screen
    pub(crate) fn start(&mut self) {
        log::info!("Round started");
        self.phase = GamePhase::Playing;
    }

    /// Rebuild the world and clear everything but the record
    pub(crate) fn reset_round(&mut self) {
        self.world = self.builder.build();
        self.scoreboard.reset_round();
        self.stability = fresh_history(&self.settings);
        self.control = PlayerControl::default();
        self.latches = RoundLatches::default();
        self.pending_upper_point = None;
        self.upper_line = self.settings.screen_height;
        self.phase = GamePhase::Playing;
        log::info!("Round reset (best {})", self.scoreboard.best());
    }

    /// Hand the tick a fresh upper point measurement
    ///
    /// Clamped so the line never drops below the foot of the score ruler.
    pub fn record_upper_point(&mut self, upper_point: f32) {
        let clamped = upper_point.min(self.settings.baseline() + 5.0);
        self.pending_upper_point = Some(clamped);
        self.upper_line = clamped;
    }

    pub fn hud(&self) -> HudView {
        HudView {
            phase: self.phase,
            score: self.scoreboard.display_score(),
            best: self.scoreboard.display_best(),
            stable: self.latches.stable.is_set(),
            lost: self.latches.lost.is_set(),
            upper_line: self.upper_line,
            baseline: self.settings.baseline(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    pub fn best_score(&self) -> u64 {
        self.scoreboard.best()
    }

    pub fn is_stable(&self) -> bool {
        self.latches.stable.is_set()
    }

    pub fn is_lost(&self) -> bool {
        self.latches.lost.is_set()
    }

    pub fn control(&self) -> PlayerControl {
        self.control
    }

    pub fn stability(&self) -> &StabilityHistory {
        &self.stability
    }

    pub fn world(&self) -> &B::World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn fresh_history(settings: &Settings) -> StabilityHistory {
    StabilityHistory::new(
        settings.screen_height,
        settings.stability_threshold,
        settings.stability_ticks,
    )
}
