//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One fixed physics step per playing tick
//! - Seeded RNG only (via the stack builder)
//! - No rendering or platform dependencies beyond the seams in
//!   [`crate::physics`] and [`crate::platform`]

pub mod score;
pub mod stability;
pub mod stack;
pub mod state;
pub mod tick;

pub use score::{ScoreDisplay, Scoreboard};
pub use stability::{StabilityHistory, UpperPointScan, upper_point};
pub use stack::StackBuilder;
pub use state::{Game, GamePhase, HudView, Latch, PlayerControl, RoundLatches};
pub use tick::{Flow, TickInput, tick};
