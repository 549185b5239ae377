//! Wall collision response
//!
//! The box is axis aligned, so each axis is resolved on its own: a candidate
//! coordinate past a wall flips and damps that velocity component and is
//! pulled back inside by a small margin so the same wall can't fire again on
//! the next tick.

use super::state::BoundaryBox;

/// Result of resolving one axis against its two walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounce {
    /// Corrected coordinate
    pub pos: f32,
    /// Velocity component after the bounce
    pub vel: f32,
    /// Whether a wall was hit
    pub hit: bool,
}

/// Resolve a candidate coordinate against the range `[min, max]`
pub fn bounce_axis(next: f32, vel: f32, min: f32, max: f32, damping: f32, margin: f32) -> AxisBounce {
    let below = next < min;
    let above = next > max;

    if !below && !above {
        return AxisBounce {
            pos: next,
            vel,
            hit: false,
        };
    }

    let mut pos = next;
    if below {
        pos = min + margin;
    }
    // Degenerate boxes (min > max) can trip both; the max wall wins
    if above {
        pos = max - margin;
    }

    AxisBounce {
        pos,
        vel: -vel * damping,
        hit: true,
    }
}

/// Flip a flee x-velocity that would carry the button into a side wall
/// within `ticks` steps. Returns the corrected velocity and whether it flipped.
pub fn look_ahead_x(x: f32, vx: f32, ticks: f32, bounds: &BoundaryBox) -> (f32, bool) {
    let predicted = x + vx * ticks;
    if bounds.outside_x(predicted) {
        (-vx, true)
    } else {
        (vx, false)
    }
}
