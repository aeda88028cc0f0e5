//! Round score and in-memory record
//!
//! The counter wraps on overflow. When that happens the numeric value is no
//! longer meaningful, so a latch switches the display to a "max" marker while
//! the stored counter keeps accumulating.

use serde::Serialize;

use super::state::Latch;

/// What the HUD should show for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreDisplay {
    Value(u64),
    Max,
}

/// Current round score plus the best score of the process lifetime
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    score: u64,
    best: u64,
    /// Set when this round's counter wrapped
    max_score_reached: Latch,
    /// Set when any round's counter wrapped; survives resets
    record_overflowed: Latch,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positive delta. Returns true if the counter wrapped.
    pub fn add(&mut self, delta: u64) -> bool {
        let old = self.score;
        self.score = self.score.wrapping_add(delta);

        let wrapped = self.score < old;
        if wrapped {
            if !self.max_score_reached.is_set() {
                log::warn!("Score counter wrapped, showing MAXSCORE from now on");
            }
            self.max_score_reached.set();
            self.record_overflowed.set();
        }

        if self.score > self.best {
            self.best = self.score;
        }
        wrapped
    }

    /// Clear the round score; the record survives
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.max_score_reached = Latch::default();
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn max_score_reached(&self) -> bool {
        self.max_score_reached.is_set()
    }

    pub fn display_score(&self) -> ScoreDisplay {
        if self.max_score_reached.is_set() {
            ScoreDisplay::Max
        } else {
            ScoreDisplay::Value(self.score)
        }
    }

    pub fn display_best(&self) -> ScoreDisplay {
        if self.record_overflowed.is_set() {
            ScoreDisplay::Max
        } else {
            ScoreDisplay::Value(self.best)
        }
    }

    #[cfg(test)]
    pub(crate) fn set_score_for_test(&mut self, score: u64) {
        self.score = score;
        self.best = self.best.max(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_best_tracks_score_and_survives_reset() {
        let mut board = Scoreboard::new();
        board.add(40);
        board.add(2);
        assert_eq!(board.score(), 42);
        assert_eq!(board.best(), 42);

        board.reset_round();
        assert_eq!(board.score(), 0);
        assert_eq!(board.best(), 42);

        board.add(10);
        assert_eq!(board.best(), 42);
        assert_eq!(board.display_score(), ScoreDisplay::Value(10));
        assert_eq!(board.display_best(), ScoreDisplay::Value(42));
    }

    #[test]
    fn test_overflow_latches_display_but_counter_keeps_wrapping() {
        let mut board = Scoreboard::new();
        board.set_score_for_test(u64::MAX - 5);

        assert!(!board.add(5));
        assert!(board.add(10));
        assert_eq!(board.score(), 9);
        assert!(board.max_score_reached());
        assert_eq!(board.display_score(), ScoreDisplay::Max);
        assert_eq!(board.display_best(), ScoreDisplay::Max);
        assert_eq!(board.best(), u64::MAX);

        // Counter keeps moving underneath the latch
        assert!(!board.add(1));
        assert_eq!(board.score(), 10);
        assert_eq!(board.display_score(), ScoreDisplay::Max);

        // Round latch clears, record latch does not
        board.reset_round();
        assert_eq!(board.display_score(), ScoreDisplay::Value(0));
        assert_eq!(board.display_best(), ScoreDisplay::Max);
    }

    proptest! {
        #[test]
        fn prop_score_non_decreasing_and_bounded_by_best(
            deltas in prop::collection::vec(1u64..10_000, 0..200)
        ) {
            let mut board = Scoreboard::new();
            let mut previous = 0;
            for delta in deltas {
                board.add(delta);
                prop_assert!(board.score() > previous);
                prop_assert!(board.best() >= board.score());
                previous = board.score();
            }
        }
    }
}
