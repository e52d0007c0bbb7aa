//! Per-frame input consumed by the simulation

/// Input state for one tick
///
/// Produced by the input layer; the simulation never reads devices directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Horizontal axis: -1 left, 0 none, 1 right
    pub horizontal: i8,
    pub jump_held: bool,
    /// Discrete trigger: reset to spawn, clear progress, restart countdown
    pub restart_from_spawn: bool,
    /// Discrete trigger: restart the timer only
    pub restart_timer: bool,
}

impl FrameInput {
    /// Horizontal axis as a float in {-1, 0, 1}
    #[inline]
    pub fn axis(&self) -> f32 {
        self.horizontal.signum() as f32
    }

    pub fn moving(horizontal: i8) -> Self {
        Self {
            horizontal,
            ..Self::default()
        }
    }

    pub fn with_jump(mut self, held: bool) -> Self {
        self.jump_held = held;
        self
    }
}
