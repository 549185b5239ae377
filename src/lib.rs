//! Runaway Button - a button that runs away from the pointer
//!
//! Core modules:
//! - `sim`: Deterministic motion (integrator, wall bounce, activation + flee)
//! - `platform`: Host driver (frame loop scheduling, pointer forwarding)
//! - `animation`: Squish wobble played while the button is loose
//! - `tuning`: Data-driven constants

pub mod animation;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Motion configuration constants
///
/// Distances are in host pixels, speeds in pixels per tick.
pub mod consts {
    /// Pointer distance that wakes the button up (button radius is ~32px)
    pub const ACTIVATION_RADIUS: f32 = 35.0;
    /// Pointer distance inside which the button runs away
    pub const FLEE_RADIUS: f32 = 140.0;
    /// Speed of the random kick given on activation
    pub const KICK_SPEED: f32 = 10.0;
    /// Speed of the flee impulse
    pub const FLEE_BOOST: f32 = 8.0;
    /// Velocity multiplier applied on every wall bounce
    pub const BOUNCE_DAMPING: f32 = 0.95;
    /// Inward offset applied when clamping to a wall
    pub const WALL_MARGIN: f32 = 2.0;
    /// Ticks predicted ahead when checking a flee velocity against the side walls
    pub const LOOK_AHEAD_TICKS: f32 = 5.0;

    /// Boundary box, relative to the rest position (screen y grows downward)
    pub const BOUND_RIGHT: f32 = 170.0;
    pub const BOUND_LEFT: f32 = 280.0; // Negative
    pub const BOUND_TOP_Y: f32 = -610.0;
    pub const BOUND_BOTTOM_Y: f32 = 80.0;

    /// Scale applied while the pointer is over the button
    pub const HOVER_SCALE: f32 = 1.25;
    /// Length of one wobble loop (seconds)
    pub const WOBBLE_PERIOD: f32 = 2.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
