//! Speedrun timer, countdown and finish overlay
//!
//! All times are session-clock seconds (`f64`). Overlays derive their
//! remaining time from the clock rather than decrementing a counter.

/// High-level phase of a run, as shown to the player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Neither counting down, running, nor completed
    Idle,
    Countdown,
    Running,
    Completed,
}

/// A run that just completed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletedRun {
    pub time: f64,
    /// Best time after this run
    pub best_time: f64,
    pub new_best: bool,
}

/// Run timer with a persisted best time
#[derive(Clone, Debug, Default)]
pub struct SpeedrunTimer {
    start_time: Option<f64>,
    current_time: f64,
    is_running: bool,
    completed: bool,
    best_time: Option<f64>,
}

impl SpeedrunTimer {
    pub fn new(best_time: Option<f64>) -> Self {
        Self {
            best_time,
            ..Self::default()
        }
    }

    /// Stop and zero the timer; the best time is kept
    pub fn reset(&mut self) {
        self.start_time = None;
        self.current_time = 0.0;
        self.is_running = false;
        self.completed = false;
    }

    /// Begin a fresh run at `now`
    pub fn start(&mut self, now: f64) {
        self.start_time = Some(now);
        self.current_time = 0.0;
        self.is_running = true;
        self.completed = false;
    }

    /// Refresh the elapsed time while running
    pub fn update(&mut self, now: f64) {
        if let (true, Some(start)) = (self.is_running, self.start_time) {
            self.current_time = (now - start).max(0.0);
        }
    }

    /// Finish the run at `now`
    ///
    /// Only a running, not yet completed run can complete. The best time
    /// becomes the minimum of the previous best and this run.
    pub fn complete(&mut self, now: f64) -> Option<CompletedRun> {
        if !self.is_running || self.completed {
            return None;
        }
        self.update(now);
        self.is_running = false;
        self.completed = true;

        let time = self.current_time;
        let new_best = self.best_time.map_or(true, |best| time < best);
        if new_best {
            self.best_time = Some(time);
        }
        Some(CompletedRun {
            time,
            best_time: self.best_time.unwrap_or(time),
            new_best,
        })
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn best_time(&self) -> Option<f64> {
        self.best_time
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// An overlay shown for a fixed duration from a start time
#[derive(Clone, Debug, Default)]
pub struct TimedOverlay {
    active: bool,
    start_time: f64,
    duration: f64,
    time_left: f64,
}

impl TimedOverlay {
    pub fn start(&mut self, now: f64, duration: f64) {
        self.active = true;
        self.start_time = now;
        self.duration = duration;
        self.time_left = duration;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.time_left = 0.0;
    }

    /// Recompute the remaining time; returns true on the update that expires it
    pub fn update(&mut self, now: f64) -> bool {
        if !self.active {
            return false;
        }
        self.time_left = self.duration - (now - self.start_time);
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.active = false;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }
}

/// Format seconds as `MM:SS.mmm`
pub fn format_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let minutes = total_ms / 60_000;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, secs, millis)
}
