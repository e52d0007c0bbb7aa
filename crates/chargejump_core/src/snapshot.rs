//! Read-only view of a session for presentation

use chargejump_math::{Rect, Vec2};
use chargejump_physics::PlatformId;

use crate::timer::RunPhase;

#[derive(Clone, Debug, PartialEq)]
pub struct PlatformView {
    pub id: PlatformId,
    pub rect: Rect,
    pub one_way: bool,
    pub ice: bool,
    pub moving: bool,
    pub collidable: bool,
    pub platform_type: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyView {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckpointView {
    pub rect: Rect,
    pub reached: bool,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub player: Rect,
    pub platforms: Vec<PlatformView>,
    pub enemies: Vec<EnemyView>,
    pub checkpoints: Vec<CheckpointView>,
    pub finish: Option<Rect>,
    /// Point the camera is centered on
    pub camera: Vec2,
    /// Jump charge in [0, 1]; zero when not charging
    pub charge_ratio: f32,
    /// Current run time, `MM:SS.mmm`
    pub timer_text: String,
    pub best_text: Option<String>,
    /// Seconds left on the countdown while it is active
    pub countdown: Option<f64>,
    /// Seconds left on the finish overlay while it is active
    pub finish_display: Option<f64>,
    pub phase: RunPhase,
}

impl RenderSnapshot {
    /// One-line status text
    pub fn hud_line(&self) -> String {
        let status = match (self.countdown, self.finish_display) {
            (Some(left), _) => format!("Get ready {}", left.ceil().max(1.0) as u32),
            (None, Some(_)) => format!("FINISH {}", self.timer_text),
            (None, None) => match self.phase {
                RunPhase::Completed => "Done".to_string(),
                RunPhase::Running => "Go".to_string(),
                _ => "Idle".to_string(),
            },
        };
        let best = self.best_text.as_deref().unwrap_or("--:--.---");
        format!(
            "{} | Time {} | Best {} | Charge {:>3}%",
            status,
            self.timer_text,
            best,
            (self.charge_ratio.clamp(0.0, 1.0) * 100.0).round() as u32
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RenderSnapshot {
        RenderSnapshot {
            player: Rect::new(0.0, 0.0, 20.0, 28.0),
            platforms: Vec::new(),
            enemies: Vec::new(),
            checkpoints: Vec::new(),
            finish: None,
            camera: Vec2::ZERO,
            charge_ratio: 0.5,
            timer_text: "00:01.250".to_string(),
            best_text: None,
            countdown: None,
            finish_display: None,
            phase: RunPhase::Running,
        }
    }

    #[test]
    fn test_hud_line_running() {
        assert_eq!(
            snapshot().hud_line(),
            "Go | Time 00:01.250 | Best --:--.--- | Charge  50%"
        );
    }

    #[test]
    fn test_hud_line_countdown() {
        let mut snap = snapshot();
        snap.countdown = Some(2.2);
        snap.phase = RunPhase::Countdown;
        assert!(snap.hud_line().starts_with("Get ready 3 |"));
    }

    #[test]
    fn test_hud_line_finish() {
        let mut snap = snapshot();
        snap.finish_display = Some(1.0);
        snap.best_text = Some("00:01.250".to_string());
        snap.phase = RunPhase::Completed;
        assert!(snap.hud_line().starts_with("FINISH 00:01.250"));
        assert!(snap.hud_line().contains("Best 00:01.250"));
    }
}
