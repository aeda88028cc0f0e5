//! Fixed timestep game tick
//!
//! One call per rendered frame. The physics world advances by exactly one
//! fixed step per playing tick; there is no accumulator.

use glam::Vec2;

use super::state::{Game, GamePhase};
use crate::physics::{PhysicsWorld, SceneBuilder};
use crate::platform::{InputSource, Key};

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Raw horizontal pointer position
    pub pointer_x: i32,
    /// Confirm key went down this frame (start / restart)
    pub confirm: bool,
    /// Quit key went down this frame
    pub quit: bool,
}

impl TickInput {
    pub fn poll<I: InputSource + ?Sized>(source: &I) -> Self {
        Self {
            pointer_x: source.pointer_x(),
            confirm: source.was_key_just_pressed(Key::Confirm),
            quit: source.was_key_just_pressed(Key::Quit),
        }
    }
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Advance the game by one tick
pub fn tick<B: SceneBuilder>(game: &mut Game<B>, input: &TickInput) -> Flow {
    if input.quit {
        log::info!("Quit requested (best {})", game.scoreboard.best());
        return Flow::Quit;
    }

    match game.phase {
        GamePhase::Intro => {
            if input.confirm {
                game.start();
            }
        }
        GamePhase::Playing => {
            if !game.latches.round_over() {
                game.advance(input.pointer_x);
            }
        }
        GamePhase::StableLost | GamePhase::NoObjectsLost => {
            if input.confirm {
                game.reset_round();
            }
        }
    }

    Flow::Continue
}

impl<B: SceneBuilder> Game<B> {
    fn advance(&mut self, pointer_x: i32) {
        self.steer(pointer_x);

        if let Some(upper_point) = self.pending_upper_point.take() {
            self.score_upper_point(upper_point);
            if self.stability.observe(upper_point) {
                self.latches.stable.set();
            }
        }

        self.world.step(self.settings.timestep);

        if self.latches.stable.is_set() {
            self.phase = GamePhase::StableLost;
            log::info!(
                "Tower is stable: score {}, best {}",
                self.scoreboard.score(),
                self.scoreboard.best()
            );
        } else if self.latches.lost.is_set() {
            self.phase = GamePhase::NoObjectsLost;
            log::info!(
                "No objects left: score {}, best {}",
                self.scoreboard.score(),
                self.scoreboard.best()
            );
        }
    }

    /// Drive the platform from the pointer delta since last tick
    fn steer(&mut self, pointer_x: i32) {
        if self.control.pointer_initialized {
            let dx = pointer_x.saturating_sub(self.control.last_pointer_x);
            let vx = self.settings.pointer_gain * dx as f32;
            self.world.set_platform_velocity(Vec2::new(vx, 0.0));
        } else if pointer_x != 0 {
            self.control.pointer_initialized = true;
        }
        self.control.last_pointer_x = pointer_x;
    }

    /// Score the gap between the baseline and the upper point
    fn score_upper_point(&mut self, upper_point: f32) {
        let baseline = self.settings.baseline() as i64;
        let delta = baseline - upper_point as i64;

        if delta > 0 {
            self.scoreboard.add(delta as u64);
        } else {
            log::debug!(
                "Nothing above baseline: baseline={} delta={} upper={}",
                baseline,
                delta,
                upper_point
            );
            if self.scoreboard.score() > 0 {
                self.latches.lost.set();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyRole;
    use crate::settings::Settings;
    use crate::sim::ScoreDisplay;
    use proptest::prelude::*;

    #[derive(Default)]
    struct FakeWorld {
        boxes: usize,
        steps: u32,
        velocity: Option<Vec2>,
    }

    impl PhysicsWorld for FakeWorld {
        fn step(&mut self, _dt: f32) {
            self.steps += 1;
        }
        fn set_platform_velocity(&mut self, velocity: Vec2) {
            self.velocity = Some(velocity);
        }
        fn for_each_polygon(&self, _visit: &mut dyn FnMut(BodyRole, &[Vec2])) {}
        fn box_count(&self) -> usize {
            self.boxes
        }
    }

    #[derive(Default)]
    struct FakeBuilder {
        builds: u32,
    }

    impl SceneBuilder for FakeBuilder {
        type World = FakeWorld;

        fn build(&mut self) -> FakeWorld {
            self.builds += 1;
            FakeWorld {
                boxes: 13,
                ..FakeWorld::default()
            }
        }
    }

    const CONFIRM: TickInput = TickInput {
        pointer_x: 0,
        confirm: true,
        quit: false,
    };

    fn playing_game() -> Game<FakeBuilder> {
        let mut game = Game::new(Settings::default(), FakeBuilder::default());
        tick(&mut game, &CONFIRM);
        game
    }

    /// Render-then-tick with a given measurement
    fn frame(game: &mut Game<FakeBuilder>, upper_point: f32) {
        game.record_upper_point(upper_point);
        tick(game, &TickInput::default());
    }

    #[test]
    fn test_confirm_starts_round() {
        let mut game = Game::new(Settings::default(), FakeBuilder::default());
        assert_eq!(game.phase(), GamePhase::Intro);

        tick(&mut game, &TickInput::default());
        assert_eq!(game.phase(), GamePhase::Intro);
        assert_eq!(game.world().steps, 0);

        tick(&mut game, &CONFIRM);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
        assert!(!game.is_stable());
        assert!(!game.is_lost());
        assert_eq!(game.world().box_count(), 13);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let quit = TickInput {
            quit: true,
            ..TickInput::default()
        };
        let mut game = Game::new(Settings::default(), FakeBuilder::default());
        assert_eq!(tick(&mut game, &quit), Flow::Quit);

        let mut game = playing_game();
        assert_eq!(tick(&mut game, &TickInput::default()), Flow::Continue);
        assert_eq!(tick(&mut game, &quit), Flow::Quit);
    }

    #[test]
    fn test_one_physics_step_per_playing_tick() {
        let mut game = playing_game();
        for _ in 0..10 {
            tick(&mut game, &TickInput::default());
        }
        assert_eq!(game.world().steps, 10);
    }

    #[test]
    fn test_pointer_must_initialize_before_steering() {
        let mut game = playing_game();
        let at = |x| TickInput {
            pointer_x: x,
            ..TickInput::default()
        };

        tick(&mut game, &at(0));
        assert!(!game.control().pointer_initialized);
        assert_eq!(game.world().velocity, None);

        tick(&mut game, &at(100));
        assert!(game.control().pointer_initialized);
        assert_eq!(game.world().velocity, None);

        tick(&mut game, &at(103));
        assert_eq!(game.world().velocity, Some(Vec2::new(180.0, 0.0)));

        tick(&mut game, &at(101));
        assert_eq!(game.world().velocity, Some(Vec2::new(-120.0, 0.0)));
        assert_eq!(game.control().last_pointer_x, 101);
    }

    #[test]
    fn test_measurement_is_consumed_once() {
        let mut game = playing_game();
        frame(&mut game, 475.0);
        assert_eq!(game.score(), 200);

        // No render in between: nothing to score
        tick(&mut game, &TickInput::default());
        assert_eq!(game.score(), 200);
        assert_eq!(game.stability().ticks_since_change(), 0);
    }

    #[test]
    fn test_steady_tower_goes_stable_and_restarts() {
        let mut game = playing_game();
        frame(&mut game, 500.0);
        for i in 0..179 {
            frame(&mut game, 500.0 + (i % 5) as f32 - 2.0);
            assert_eq!(game.phase(), GamePhase::Playing);
        }
        frame(&mut game, 504.0);
        assert!(game.is_stable());
        assert_eq!(game.phase(), GamePhase::StableLost);

        let best = game.best_score();
        assert!(best > 0);
        let steps = game.world().steps;

        // Frozen until confirm
        frame(&mut game, 100.0);
        assert_eq!(game.world().steps, steps);
        assert_eq!(game.best_score(), best);

        tick(&mut game, &CONFIRM);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.best_score(), best);
        assert!(!game.is_stable());
        assert_eq!(game.builder.builds, 2);
        assert_eq!(game.world().steps, 0);
        assert_eq!(game.control(), Default::default());
    }

    #[test]
    fn test_fallen_tower_loses_only_after_scoring() {
        let mut game = playing_game();
        frame(&mut game, 700.0);
        assert!(!game.is_lost());
        assert_eq!(game.phase(), GamePhase::Playing);

        frame(&mut game, 600.0);
        assert_eq!(game.score(), 75);
        frame(&mut game, 675.0);
        assert!(game.is_lost());
        assert_eq!(game.phase(), GamePhase::NoObjectsLost);
        assert!(game.hud().lost);
    }

    #[test]
    fn test_confirm_while_playing_is_ignored() {
        let mut game = playing_game();
        frame(&mut game, 600.0);

        tick(&mut game, &CONFIRM);
        tick(&mut game, &CONFIRM);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 75);
        assert_eq!(game.builder.builds, 1);
    }

    #[test]
    fn test_measurement_is_clamped_to_ruler_foot() {
        let mut game = playing_game();
        game.record_upper_point(700.0);
        assert_eq!(game.hud().upper_line, 680.0);
        game.record_upper_point(320.0);
        assert_eq!(game.hud().upper_line, 320.0);
    }

    #[test]
    fn test_overflow_switches_display_to_max() {
        let mut game = playing_game();
        game.scoreboard.set_score_for_test(u64::MAX - 10);

        frame(&mut game, 575.0);
        assert_eq!(game.score(), 89);
        assert_eq!(game.hud().score, ScoreDisplay::Max);
        assert_eq!(game.hud().best, ScoreDisplay::Max);
        assert_eq!(game.phase(), GamePhase::Playing);

        // Keeps counting underneath
        frame(&mut game, 574.0);
        assert_eq!(game.score(), 190);
    }

    #[test]
    fn test_intro_ignores_measurements() {
        let mut game = Game::new(Settings::default(), FakeBuilder::default());
        game.record_upper_point(100.0);
        tick(&mut game, &TickInput::default());
        assert_eq!(game.score(), 0);
        assert_eq!(game.world().steps, 0);
    }

    proptest! {
        #[test]
        fn prop_best_never_below_score_across_rounds(
            rounds in prop::collection::vec(prop::collection::vec(0.0f32..700.0, 1..60), 1..4)
        ) {
            let mut game = playing_game();
            for measurements in rounds {
                let mut last_score = game.score();
                for m in measurements {
                    let was_over = game.phase().is_lost();
                    frame(&mut game, m);
                    if !was_over {
                        prop_assert!(game.score() >= last_score);
                    }
                    prop_assert!(game.best_score() >= game.score());
                    last_score = game.score();
                }
                let best = game.best_score();
                if game.phase().is_lost() {
                    tick(&mut game, &CONFIRM);
                    prop_assert_eq!(game.best_score(), best);
                    prop_assert_eq!(game.score(), 0);
                }
            }
        }
    }
}
