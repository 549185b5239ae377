//! Squish wobble for a loose button
//!
//! While the button is active it loops a jelly-like squash and stretch.
//! Keyframes are evenly spaced over one period and eased in and out between
//! neighbours. X and Y move in opposition so the area stays roughly constant.

use glam::Vec2;

/// Horizontal scale keyframes
pub const WOBBLE_X: [f32; 6] = [1.0, 1.15, 0.85, 1.05, 0.95, 1.0];
/// Vertical scale keyframes
pub const WOBBLE_Y: [f32; 6] = [1.0, 0.85, 1.15, 0.95, 1.05, 1.0];

/// Ease-in-out: slow at both ends of a segment
#[inline]
fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn sample(keys: &[f32; 6], phase: f32) -> f32 {
    let segments = (keys.len() - 1) as f32;
    let pos = phase * segments;
    let i = (pos.floor() as usize).min(keys.len() - 2);
    let t = ease_in_out((pos - i as f32).clamp(0.0, 1.0));
    keys[i] + (keys[i + 1] - keys[i]) * t
}

/// Scale to draw the button with at `time_secs`
///
/// Dormant buttons sit still at `(1, 1)`.
pub fn wobble_scale(active: bool, time_secs: f64, period: f32) -> Vec2 {
    if !active || period <= 0.0 || !time_secs.is_finite() {
        return Vec2::ONE;
    }

    let phase = (time_secs.rem_euclid(period as f64) / period as f64) as f32;
    Vec2::new(sample(&WOBBLE_X, phase), sample(&WOBBLE_Y, phase))
}
