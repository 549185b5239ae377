//! Pointer interaction: activation kick and flee impulse
//!
//! Runs on every pointer move. The host passes in where the button currently
//! is on screen, so nothing here touches the rendering layer.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::collision::look_ahead_x;
use super::state::MotionState;
use crate::tuning::Tuning;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// One pointer move, with the button geometry measured at the same moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer: Vec2,
    /// Current visual center of the button
    pub center: Vec2,
    /// Current visual radius of the button
    pub radius: f32,
}

impl PointerSample {
    pub fn new(pointer_x: f32, pointer_y: f32, center_x: f32, center_y: f32, radius: f32) -> Self {
        Self {
            pointer: Vec2::new(pointer_x, pointer_y),
            center: Vec2::new(center_x, center_y),
            radius,
        }
    }

    /// Pointer to center distance. Garbage input reads as infinitely far.
    pub fn distance(&self) -> f32 {
        let d = self.pointer.distance(self.center);
        if d.is_finite() { d } else { f32::INFINITY }
    }

    /// Whether the pointer is over the button itself
    pub fn is_over(&self) -> bool {
        self.distance() <= self.radius
    }
}

/// What a pointer sample did to the motion state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerResponse {
    /// The button just woke up
    pub activated: bool,
    /// Velocity was overwritten by a flee impulse
    pub fled: bool,
    /// The flee x-velocity was flipped to avoid a side wall
    pub wall_corrected: bool,
    /// Pointer is over the button
    pub hovered: bool,
}

/// Apply one pointer sample to the motion state
///
/// Both rules look at the activation flag as it was when the sample arrived,
/// so the sample that wakes the button keeps its random kick and fleeing
/// starts with the next one.
pub fn on_pointer_sample(
    state: &mut MotionState,
    sample: &PointerSample,
    tuning: &Tuning,
) -> PointerResponse {
    let distance = sample.distance();
    let was_active = state.is_active();

    let mut response = PointerResponse {
        hovered: sample.is_over(),
        ..Default::default()
    };

    if !was_active && distance < tuning.activation_radius {
        let angle = state.rng.random_range(0.0..TAU);
        state.activate(polar_to_cartesian(tuning.kick_speed, angle));
        response.activated = true;
        log::info!(
            "Activated at distance {:.1}, kick angle {:.2} rad",
            distance,
            angle
        );
    }

    if was_active && distance < tuning.flee_radius {
        // Angle from the button to the pointer; run the opposite way
        let (_, angle) = cartesian_to_polar(sample.pointer - sample.center);
        let mut vel = -polar_to_cartesian(tuning.flee_boost, angle);

        let (vx, flipped) = look_ahead_x(
            state.position().x,
            vel.x,
            tuning.look_ahead_ticks,
            &tuning.bounds,
        );
        vel.x = vx;

        state.set_velocity(vel);
        response.fled = true;
        response.wall_corrected = flipped;
        log::trace!(
            "Flee at distance {:.1} -> ({:.2}, {:.2}){}",
            distance,
            vel.x,
            vel.y,
            if flipped { " (wall corrected)" } else { "" }
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_at(pos: Vec2) -> MotionState {
        let mut state = MotionState::at(pos, 42);
        state.activate(Vec2::new(1.0, 1.0));
        state
    }

    #[test]
    fn test_activation_kick() {
        let tuning = Tuning::default();
        let mut state = MotionState::new(42);
        let sample = PointerSample::new(120.0, 100.0, 100.0, 100.0, 35.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert!(r.activated);
        assert!(!r.fled);
        assert!(state.is_active());
        assert!((state.velocity().length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_activation_outside_radius() {
        let tuning = Tuning::default();
        let mut state = MotionState::new(42);
        let sample = PointerSample::new(100.0, 0.0, 0.0, 0.0, 32.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert_eq!(r, PointerResponse::default());
        assert!(!state.is_active());
        assert_eq!(state.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_activation_radius_is_exclusive() {
        let tuning = Tuning::default();
        let mut state = MotionState::new(42);
        let sample = PointerSample::new(35.0, 0.0, 0.0, 0.0, 32.0);
        on_pointer_sample(&mut state, &sample, &tuning);
        assert!(!state.is_active());
    }

    #[test]
    fn test_activation_fires_once() {
        let tuning = Tuning::default();
        let mut state = MotionState::new(42);
        let sample = PointerSample::new(0.0, 0.0, 0.0, 200.0, 32.0);
        let close = PointerSample::new(0.0, 190.0, 0.0, 200.0, 32.0);

        on_pointer_sample(&mut state, &sample, &tuning);
        let first = on_pointer_sample(&mut state, &close, &tuning);
        let second = on_pointer_sample(&mut state, &close, &tuning);
        assert!(first.activated);
        assert!(!second.activated);
        assert!(second.fled);
    }

    #[test]
    fn test_same_seed_same_kick() {
        let tuning = Tuning::default();
        let sample = PointerSample::new(1.0, 0.0, 0.0, 0.0, 32.0);
        let mut a = MotionState::new(99);
        let mut b = MotionState::new(99);
        on_pointer_sample(&mut a, &sample, &tuning);
        on_pointer_sample(&mut b, &sample, &tuning);
        assert_eq!(a.velocity(), b.velocity());
    }

    #[test]
    fn test_flee_directly_away() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::ZERO);
        let sample = PointerSample::new(10.0, 0.0, 0.0, 0.0, 32.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert!(r.fled);
        assert!(!r.wall_corrected);
        let v = state.velocity();
        assert!((v.x + 8.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
    }

    #[test]
    fn test_flee_diagonal() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::ZERO);
        // Pointer below-right of the button
        let sample = PointerSample::new(30.0, 30.0, 0.0, 0.0, 32.0);

        on_pointer_sample(&mut state, &sample, &tuning);
        let v = state.velocity();
        assert!((v.length() - 8.0).abs() < 1e-4);
        assert!(v.x < 0.0 && v.y < 0.0);
        assert!((v.x - v.y).abs() < 1e-4);
    }

    #[test]
    fn test_flee_overwrites_velocity() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::ZERO);
        state.set_velocity(Vec2::new(50.0, -50.0));
        let sample = PointerSample::new(0.0, 100.0, 0.0, 0.0, 32.0);

        on_pointer_sample(&mut state, &sample, &tuning);
        let v = state.velocity();
        assert!(v.x.abs() < 1e-5);
        assert!((v.y + 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_no_flee_outside_radius() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::ZERO);
        let before = state.velocity();
        let sample = PointerSample::new(200.0, 0.0, 0.0, 0.0, 32.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert!(!r.fled);
        assert_eq!(state.velocity(), before);
    }

    #[test]
    fn test_flee_repeats_every_sample() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::ZERO);
        let sample = PointerSample::new(10.0, 0.0, 0.0, 0.0, 32.0);
        for _ in 0..5 {
            state.set_velocity(Vec2::new(3.0, 3.0));
            assert!(on_pointer_sample(&mut state, &sample, &tuning).fled);
            assert!((state.velocity().x + 8.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_look_ahead_flips_toward_open_space() {
        let tuning = Tuning::default();
        // Fleeing left from x = 215 would still be past the right wall
        let mut state = active_at(Vec2::new(215.0, 0.0));
        let sample = PointerSample::new(10.0, 0.0, 0.0, 0.0, 32.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert!(r.wall_corrected);
        assert!((state.velocity().x - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_ahead_near_left_wall() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::new(-260.0, 0.0));
        // Pointer to the right, so flee is to the left, into the wall
        let sample = PointerSample::new(-240.0, 0.0, -260.0, 0.0, 32.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert!(r.wall_corrected);
        assert!((state.velocity().x - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_ahead_ignores_y() {
        let tuning = Tuning::default();
        let mut state = active_at(Vec2::new(0.0, 75.0));
        // Pointer above, flee is downward into the bottom wall
        let sample = PointerSample::new(0.0, 65.0, 0.0, 75.0, 32.0);

        let r = on_pointer_sample(&mut state, &sample, &tuning);
        assert!(!r.wall_corrected);
        assert!((state.velocity().y - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_nan_pointer_is_ignored() {
        let tuning = Tuning::default();
        let mut dormant = MotionState::new(1);
        let mut active = active_at(Vec2::ZERO);
        let before = active.velocity();
        let sample = PointerSample::new(f32::NAN, 0.0, 0.0, 0.0, 32.0);

        assert_eq!(sample.distance(), f32::INFINITY);
        let r = on_pointer_sample(&mut dormant, &sample, &tuning);
        assert!(!r.activated && !r.hovered);
        assert!(!dormant.is_active());

        on_pointer_sample(&mut active, &sample, &tuning);
        assert_eq!(active.velocity(), before);
    }

    #[test]
    fn test_hover_uses_sample_radius() {
        let tuning = Tuning::default();
        let mut state = MotionState::new(1);
        let r = on_pointer_sample(
            &mut state,
            &PointerSample::new(60.0, 0.0, 0.0, 0.0, 64.0),
            &tuning,
        );
        assert!(r.hovered);
        assert!(!r.activated);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn activation_is_monotonic(
                samples in prop::collection::vec(
                    (-400.0_f32..400.0, -400.0_f32..400.0, -400.0_f32..400.0, -400.0_f32..400.0),
                    1..80,
                ),
                seed in any::<u64>(),
            ) {
                let tuning = Tuning::default();
                let mut state = MotionState::new(seed);
                let mut seen_active = false;
                for (px, py, cx, cy) in samples {
                    on_pointer_sample(&mut state, &PointerSample::new(px, py, cx, cy, 32.0), &tuning);
                    state.step(&tuning);
                    if seen_active {
                        prop_assert!(state.is_active());
                    }
                    seen_active |= state.is_active();
                }
            }

            #[test]
            fn kick_speed_is_exact(seed in any::<u64>()) {
                let tuning = Tuning::default();
                let mut state = MotionState::new(seed);
                on_pointer_sample(&mut state, &PointerSample::new(0.0, 0.0, 0.0, 0.0, 32.0), &tuning);
                prop_assert!((state.velocity().length() - 10.0).abs() < 1e-4);
            }
        }
    }
}
