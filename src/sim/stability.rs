//! Upper point measurement and stability detection
//!
//! The upper point is the topmost (smallest Y) polygon vertex inside the
//! visible width. A tower whose upper point stops moving for long enough is
//! considered stable.

use glam::Vec2;

use crate::physics::PhysicsWorld;

/// Running minimum over polygon vertices within `0..=width`
#[derive(Debug, Clone, Copy)]
pub struct UpperPointScan {
    width: f32,
    upper: f32,
}

impl UpperPointScan {
    /// Start a scan; with nothing visible the result stays at `floor`
    pub fn new(width: f32, floor: f32) -> Self {
        Self {
            width,
            upper: floor,
        }
    }

    pub fn observe(&mut self, verts: &[Vec2]) {
        for v in verts {
            if v.y < self.upper && v.x >= 0.0 && v.x <= self.width {
                self.upper = v.y;
            }
        }
    }

    pub fn upper_point(&self) -> f32 {
        self.upper
    }
}

/// Measure the upper point of every polygon in `world`
pub fn upper_point<W: PhysicsWorld + ?Sized>(world: &W, width: f32, height: f32) -> f32 {
    let mut scan = UpperPointScan::new(width, height);
    world.for_each_polygon(&mut |_, verts| scan.observe(verts));
    scan.upper_point()
}

/// Hysteresis over successive upper point measurements
#[derive(Debug, Clone)]
pub struct StabilityHistory {
    last_upper_point: f32,
    ticks_since_change: u32,
    threshold: f32,
    window: u32,
}

impl StabilityHistory {
    pub fn new(initial: f32, threshold: f32, window: u32) -> Self {
        Self {
            last_upper_point: initial,
            ticks_since_change: 0,
            threshold,
            window,
        }
    }

    /// Fold one measurement in; returns the stable verdict
    pub fn observe(&mut self, upper_point: f32) -> bool {
        if (upper_point - self.last_upper_point).abs() >= self.threshold {
            self.last_upper_point = upper_point;
            self.ticks_since_change = 0;
        } else {
            self.ticks_since_change += 1;
        }
        self.is_stable()
    }

    pub fn is_stable(&self) -> bool {
        self.ticks_since_change >= self.window
    }

    pub fn last_upper_point(&self) -> f32 {
        self.last_upper_point
    }

    pub fn ticks_since_change(&self) -> u32 {
        self.ticks_since_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyRole;
    use proptest::prelude::*;

    struct Polygons(Vec<Vec<Vec2>>);

    impl PhysicsWorld for Polygons {
        fn step(&mut self, _dt: f32) {}
        fn set_platform_velocity(&mut self, _velocity: Vec2) {}
        fn for_each_polygon(&self, visit: &mut dyn FnMut(BodyRole, &[Vec2])) {
            for poly in &self.0 {
                visit(BodyRole::Box, poly);
            }
        }
        fn box_count(&self) -> usize {
            self.0.len()
        }
    }

    #[test]
    fn test_empty_world_reads_as_floor() {
        let world = Polygons(Vec::new());
        assert_eq!(upper_point(&world, 350.0, 700.0), 700.0);
    }

    #[test]
    fn test_ignores_vertices_outside_visible_width() {
        let world = Polygons(vec![
            vec![Vec2::new(-1.0, 10.0), Vec2::new(351.0, 20.0)],
            vec![Vec2::new(0.0, 400.0), Vec2::new(350.0, 300.0)],
        ]);
        assert_eq!(upper_point(&world, 350.0, 700.0), 300.0);
    }

    #[test]
    fn test_vertices_above_the_screen_still_count() {
        let world = Polygons(vec![vec![Vec2::new(100.0, -40.0)]]);
        assert_eq!(upper_point(&world, 350.0, 700.0), -40.0);
    }

    #[test]
    fn test_becomes_stable_on_tick_180() {
        let mut history = StabilityHistory::new(700.0, 5.0, 180);
        assert!(!history.observe(500.0));
        assert_eq!(history.ticks_since_change(), 0);

        for i in 1..180 {
            let wobble = if i % 2 == 0 { 4.0 } else { -4.0 };
            assert!(!history.observe(500.0 + wobble));
        }
        assert_eq!(history.ticks_since_change(), 179);
        assert!(history.observe(503.0));
        assert_eq!(history.last_upper_point(), 500.0);
    }

    #[test]
    fn test_exact_threshold_counts_as_change() {
        let mut history = StabilityHistory::new(700.0, 5.0, 180);
        history.observe(700.0);
        history.observe(700.0);
        assert_eq!(history.ticks_since_change(), 2);
        history.observe(695.0);
        assert_eq!(history.ticks_since_change(), 0);
        assert_eq!(history.last_upper_point(), 695.0);
    }

    proptest! {
        #[test]
        fn prop_upper_point_never_below_floor(
            verts in prop::collection::vec((-100.0f32..450.0, -200.0f32..900.0), 0..40)
        ) {
            let poly: Vec<Vec2> = verts.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            let world = Polygons(vec![poly]);
            prop_assert!(upper_point(&world, 350.0, 700.0) <= 700.0);
        }

        #[test]
        fn prop_counter_resets_on_large_moves(
            samples in prop::collection::vec(0.0f32..700.0, 1..300)
        ) {
            let mut history = StabilityHistory::new(700.0, 5.0, 180);
            for sample in samples {
                let before = history.last_upper_point();
                let ticks = history.ticks_since_change();
                history.observe(sample);
                if (sample - before).abs() >= 5.0 {
                    prop_assert_eq!(history.ticks_since_change(), 0);
                    prop_assert_eq!(history.last_upper_point(), sample);
                } else {
                    prop_assert_eq!(history.ticks_since_change(), ticks + 1);
                    prop_assert_eq!(history.last_upper_point(), before);
                }
            }
        }
    }
}
