//! Motion tuning
//!
//! Every constant the simulation reads, gathered in one serializable struct.
//! Persisted in LocalStorage so the feel can be tweaked without a rebuild.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BoundaryBox;

/// Tunable motion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Interaction ===
    /// Pointer distance that activates the button
    pub activation_radius: f32,
    /// Pointer distance inside which the button flees
    pub flee_radius: f32,
    /// Speed of the one-shot activation kick (per tick)
    pub kick_speed: f32,
    /// Speed of the flee impulse (per tick)
    pub flee_boost: f32,
    /// Ticks predicted ahead when checking flee velocity against side walls
    pub look_ahead_ticks: f32,

    // === Walls ===
    /// Velocity multiplier on bounce (< 1 so bounces decay)
    pub damping: f32,
    /// Inward clamp offset after a bounce
    pub margin: f32,
    /// Reachable area
    pub bounds: BoundaryBox,

    // === Presentation ===
    /// Scale while hovered
    pub hover_scale: f32,
    /// Wobble loop length in seconds
    pub wobble_period: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            activation_radius: ACTIVATION_RADIUS,
            flee_radius: FLEE_RADIUS,
            kick_speed: KICK_SPEED,
            flee_boost: FLEE_BOOST,
            look_ahead_ticks: LOOK_AHEAD_TICKS,

            damping: BOUNCE_DAMPING,
            margin: WALL_MARGIN,
            bounds: BoundaryBox::default(),

            hover_scale: HOVER_SCALE,
            wobble_period: WOBBLE_PERIOD,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize tuning to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "runaway_button_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Tuning saved");
                }
                Err(e) => log::warn!("Failed to serialize tuning: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
