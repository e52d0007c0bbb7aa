//! Checkpoint progress tracking

use chargejump_math::Rect;

/// Ordered checkpoints, the finish volume and the furthest checkpoint reached
#[derive(Clone, Debug, Default)]
pub struct CheckpointTracker {
    checkpoints: Vec<Rect>,
    finish: Option<Rect>,
    current: Option<usize>,
}

impl CheckpointTracker {
    pub fn new(checkpoints: Vec<Rect>, finish: Option<Rect>) -> Self {
        Self {
            checkpoints,
            finish,
            current: None,
        }
    }

    pub fn checkpoints(&self) -> &[Rect] {
        &self.checkpoints
    }

    pub fn finish(&self) -> Option<Rect> {
        self.finish
    }

    /// Index of the furthest checkpoint reached this run
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Whether checkpoint `index` has been reached
    pub fn is_reached(&self, index: usize) -> bool {
        self.current.is_some_and(|c| index <= c)
    }

    /// Record touching checkpoint `index`
    ///
    /// Progress only moves forward: returns true if `index` is valid and
    /// beyond the current checkpoint.
    pub fn reach(&mut self, index: usize) -> bool {
        if index >= self.checkpoints.len() {
            return false;
        }
        if self.current.is_some_and(|c| index <= c) {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Restore saved progress; invalid indices are ignored
    pub fn restore(&mut self, index: usize) -> bool {
        if index < self.checkpoints.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Clear progress (manual reset only)
    pub fn reset(&mut self) {
        self.current = None;
    }
}
