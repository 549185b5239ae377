//! Fixed tick integrator
//!
//! Velocity is already expressed as displacement per tick, so a step is a
//! plain Euler add followed by the wall bounce. No delta time is involved.

use glam::Vec2;

use super::collision::bounce_axis;
use super::state::MotionState;
use crate::tuning::Tuning;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Position after the tick
    pub position: Vec2,
    /// Side wall hit this tick
    pub bounced_x: bool,
    /// Top/bottom wall hit this tick
    pub bounced_y: bool,
}

/// Advance the motion state by one tick
pub fn tick(state: &mut MotionState, tuning: &Tuning) -> StepResult {
    let pos = state.position();

    // Dormant buttons don't move
    if !state.is_active() {
        return StepResult {
            position: pos,
            bounced_x: false,
            bounced_y: false,
        };
    }

    let vel = state.velocity();
    let next = pos + vel;
    let bounds = &tuning.bounds;

    let x = bounce_axis(
        next.x,
        vel.x,
        bounds.min_x(),
        bounds.max_x(),
        tuning.damping,
        tuning.margin,
    );
    let y = bounce_axis(
        next.y,
        vel.y,
        bounds.top_y,
        bounds.bottom_y,
        tuning.damping,
        tuning.margin,
    );

    if x.hit || y.hit {
        log::debug!(
            "Bounce at ({:.1}, {:.1}) x={} y={}",
            x.pos,
            y.pos,
            x.hit,
            y.hit
        );
    }

    let position = Vec2::new(x.pos, y.pos);
    state.commit(position, Vec2::new(x.vel, y.vel));

    StepResult {
        position,
        bounced_x: x.hit,
        bounced_y: y.hit,
    }
}
