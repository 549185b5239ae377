//! Motion state and the boundary it lives in

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::{StepResult, tick};
use crate::consts::*;
use crate::tuning::Tuning;

/// Axis-aligned box the button must stay inside
///
/// Relative to the rest position. X spans `[-left, right]`, y spans
/// `[top_y, bottom_y]`. Not centered on the rest position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryBox {
    pub right: f32,
    /// Distance to the left wall (the wall sits at `-left`)
    pub left: f32,
    pub top_y: f32,
    pub bottom_y: f32,
}

impl Default for BoundaryBox {
    fn default() -> Self {
        Self {
            right: BOUND_RIGHT,
            left: BOUND_LEFT,
            top_y: BOUND_TOP_Y,
            bottom_y: BOUND_BOTTOM_Y,
        }
    }
}

impl BoundaryBox {
    #[inline]
    pub fn min_x(&self) -> f32 {
        -self.left
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.right
    }

    /// Check if a point lies inside the box (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.top_y && p.y <= self.bottom_y
    }

    /// Check if an x coordinate is past either side wall
    pub fn outside_x(&self, x: f32) -> bool {
        x < self.min_x() || x > self.max_x()
    }
}

/// Position, velocity and activation of the button
///
/// Position only changes through [`MotionState::step`]. The activation flag
/// only ever goes from `false` to `true`.
#[derive(Debug, Clone)]
pub struct MotionState {
    pos: Vec2,
    vel: Vec2,
    active: bool,
    /// Ticks stepped since activation
    ticks: u64,
    /// Seed for reproducibility
    seed: u64,
    /// Source of the activation kick direction
    pub(crate) rng: Pcg32,
}

impl MotionState {
    /// Create a dormant state at the rest position
    pub fn new(seed: u64) -> Self {
        Self::at(Vec2::ZERO, seed)
    }

    /// Create a dormant state at an arbitrary position
    pub fn at(pos: Vec2, seed: u64) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            active: false,
            ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance one tick. Does nothing while dormant.
    pub fn step(&mut self, tuning: &Tuning) -> StepResult {
        tick(self, tuning)
    }

    /// Wake the button up with an initial velocity (one-way)
    pub(crate) fn activate(&mut self, kick: Vec2) {
        self.active = true;
        self.vel = kick;
    }

    pub(crate) fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    /// Commit the integrated position and velocity
    pub(super) fn commit(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.ticks += 1;
    }
}
