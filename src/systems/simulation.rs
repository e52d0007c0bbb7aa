//! Game simulation system
//!
//! Manages the game loop simulation including:
//! - Delta time measurement
//! - Keyboard state → `FrameInput`
//! - Stepping the `GameSession`

use std::time::Instant;
use chargejump_core::{GameSession, RenderSnapshot, TickReport};
use chargejump_input::KeyboardController;

/// Result of a simulation update
pub struct SimulationResult {
    /// Events of this frame
    pub report: TickReport,
    /// State to present
    pub snapshot: RenderSnapshot,
}

/// Drives one session tick per redraw
///
/// The measured frame time is passed through unchanged: the session keeps
/// its clock in real time and clamps the physics step to
/// `GameplayConfig::max_dt` itself.
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Run one simulation frame using the wall clock
    pub fn update(
        &mut self,
        session: &mut GameSession,
        controller: &mut KeyboardController,
    ) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        Self::step(session, controller, raw_dt)
    }

    /// Run one simulation frame with an explicit frame time
    pub fn step(
        session: &mut GameSession,
        controller: &mut KeyboardController,
        dt: f32,
    ) -> SimulationResult {
        let input = controller.frame_input();
        let report = session.tick(&input, dt);

        if let Some(index) = report.checkpoint_reached {
            log::debug!("Checkpoint {} reached at {:.3}s", index, session.timer().current_time());
        }

        SimulationResult {
            report,
            snapshot: session.snapshot(),
        }
    }

    /// Forget the time spent away, e.g. after the window was hidden
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
