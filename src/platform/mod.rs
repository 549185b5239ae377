//! Platform abstraction layer
//!
//! The host (browser or native loop) owns two callbacks: a per-frame task and
//! a pointer listener. [`Driver`] is what both call into. It decides when the
//! frame task has to exist at all:
//! - not scheduled while the button is dormant
//! - started exactly once, on activation
//! - never scheduled again after teardown

use glam::Vec2;

use crate::animation::wobble_scale;
use crate::sim::{MotionState, PointerResponse, PointerSample, on_pointer_sample};
use crate::tuning::Tuning;

/// What the host must do with its frame loop after a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    /// Leave the loop as it is
    Keep,
    /// Start the per-frame loop now
    Start,
}

/// Everything the renderer needs to place the button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Offset from the rest position
    pub position: Vec2,
    /// Combined wobble and hover scale
    pub scale: Vec2,
    pub active: bool,
}

/// Glue between host callbacks and the simulation
#[derive(Debug)]
pub struct Driver {
    state: MotionState,
    tuning: Tuning,
    hovered: bool,
    loop_running: bool,
    released: bool,
}

impl Driver {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            state: MotionState::new(seed),
            tuning,
            hovered: false,
            loop_running: false,
            released: false,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Whether the host should currently have a frame loop scheduled
    pub fn loop_running(&self) -> bool {
        self.loop_running
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Forward a pointer move. Returns whether the frame loop must start.
    pub fn pointer_moved(&mut self, sample: &PointerSample) -> (PointerResponse, LoopCommand) {
        if self.released {
            return (PointerResponse::default(), LoopCommand::Keep);
        }

        let response = on_pointer_sample(&mut self.state, sample, &self.tuning);
        self.hovered = response.hovered;

        let command = if self.state.is_active() && !self.loop_running {
            self.loop_running = true;
            log::info!("Frame loop started");
            LoopCommand::Start
        } else {
            LoopCommand::Keep
        };

        (response, command)
    }

    /// Run one frame: step the simulation once and report where to draw.
    ///
    /// Returns `None` when no frame loop should be running; the host must
    /// not reschedule in that case.
    pub fn frame(&mut self, time_secs: f64) -> Option<FrameOutput> {
        if self.released || !self.loop_running {
            return None;
        }

        self.state.step(&self.tuning);
        Some(self.render(time_secs))
    }

    /// Current draw parameters without stepping (for hover changes while dormant)
    pub fn render(&self, time_secs: f64) -> FrameOutput {
        let active = self.state.is_active();
        let mut scale = wobble_scale(active, time_secs, self.tuning.wobble_period);
        if self.hovered {
            scale *= self.tuning.hover_scale;
        }

        FrameOutput {
            position: self.state.position(),
            scale,
            active,
        }
    }

    /// Release the driver; later frames and pointer moves are ignored
    pub fn teardown(&mut self) {
        if !self.released {
            log::info!(
                "Driver released after {} ticks (active: {})",
                self.state.ticks(),
                self.state.is_active()
            );
        }
        self.released = true;
        self.loop_running = false;
    }
}
