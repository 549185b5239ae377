//! Deterministic motion simulation
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Fixed ticks only, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod interaction;
pub mod state;
pub mod tick;

pub use collision::{AxisBounce, bounce_axis, look_ahead_x};
pub use interaction::{PointerResponse, PointerSample, on_pointer_sample};
pub use state::{BoundaryBox, MotionState};
pub use tick::{StepResult, tick};
