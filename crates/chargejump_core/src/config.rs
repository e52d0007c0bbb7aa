//! Gameplay tuning that sits above raw movement physics

use serde::{Deserialize, Serialize};

/// Gameplay rules and timings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Length of the pre-run countdown (s)
    pub countdown_seconds: f32,
    /// How long the finish overlay stays up (s)
    pub finish_display_seconds: f32,
    /// Speed given to the player by an enemy push (px/s)
    pub enemy_push_force: f32,
    /// Minimum upward speed after an enemy push (px/s)
    pub min_upward_push: f32,
    /// Cooldown after a push during which no further push applies (s)
    pub invincibility_seconds: f32,
    /// Default enemy patrol speed along the perimeter (px/s)
    pub enemy_speed: f32,
    /// Default enemy radius (px)
    pub enemy_radius: f32,
    /// Default moving-platform speed when the level omits one (px/s)
    pub moving_platform_speed: f32,
    /// Largest simulated step; longer frames are truncated (s)
    pub max_dt: f32,
    /// Translate a grounded player with the platform under it
    pub carry_on_moving_platforms: bool,
    /// Exponential camera follow rate (1/s)
    pub camera_follow_rate: f32,
    /// Distance below the level's lowest extent that triggers a respawn (px)
    pub kill_plane_margin: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: 3.0,
            finish_display_seconds: 3.0,
            enemy_push_force: 420.0,
            min_upward_push: 220.0,
            invincibility_seconds: 0.6,
            enemy_speed: 60.0,
            enemy_radius: 10.0,
            moving_platform_speed: 80.0,
            max_dt: 0.033,
            carry_on_moving_platforms: true,
            camera_follow_rate: 8.0,
            kill_plane_margin: 400.0,
        }
    }
}

impl GameplayConfig {
    /// Physics step for a frame of `dt` seconds
    ///
    /// Never negative. A negative or NaN `max_dt` yields a zero step.
    pub fn step_dt(&self, dt: f32) -> f32 {
        let max_dt = self.max_dt.max(0.0);
        dt.max(0.0).min(max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_dt_truncates_long_frames() {
        let config = GameplayConfig::default();
        assert_eq!(config.step_dt(0.01), 0.01);
        assert_eq!(config.step_dt(1.0), config.max_dt);
        assert_eq!(config.step_dt(-0.5), 0.0);
    }

    #[test]
    fn test_step_dt_with_bad_max_dt() {
        let negative = GameplayConfig {
            max_dt: -0.01,
            ..GameplayConfig::default()
        };
        assert_eq!(negative.step_dt(1.0 / 60.0), 0.0);

        let nan = GameplayConfig {
            max_dt: f32::NAN,
            ..GameplayConfig::default()
        };
        assert_eq!(nan.step_dt(1.0 / 60.0), 0.0);
        assert_eq!(nan.step_dt(f32::NAN), 0.0);
    }
}
