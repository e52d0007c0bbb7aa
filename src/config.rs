//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`CJ_SECTION__KEY`)

use chargejump_core::{GameplayConfig, MovementConfig};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// Which level to play
    #[serde(default)]
    pub level: LevelConfig,
    /// Where progress is saved
    #[serde(default)]
    pub save: SaveConfig,
    /// Player movement tuning
    #[serde(default)]
    pub movement: MovementConfig,
    /// Gameplay rules and timings
    #[serde(default)]
    pub gameplay: GameplayConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`CJ_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CJ_MOVEMENT__GRAVITY=1200 -> movement.gravity = 1200
        figment = figment.merge(Env::prefixed("CJ_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title; the HUD line is appended to it
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ChargeJump".to_string(),
            width: 960,
            height: 540,
            fullscreen: false,
        }
    }
}

/// Level selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// RON level file; the built-in sample level is used if it cannot be loaded
    pub path: PathBuf,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("levels/first_climb.ron"),
        }
    }
}

/// Save file location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Directory holding the best time and checkpoint saves
    pub dir: PathBuf,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("saves"),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 960);
        assert_eq!(config.movement.gravity, 1400.0);
        assert_eq!(config.gameplay.countdown_seconds, 3.0);
        assert_eq!(config.level.path, PathBuf::from("levels/first_climb.ron"));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("gravity"));
        assert!(toml.contains("carry_on_moving_platforms"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [movement]
            gravity = 900.0

            [gameplay]
            countdown_seconds = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.movement.gravity, 900.0);
        assert_eq!(config.movement.v_jump_max, MovementConfig::default().v_jump_max);
        assert_eq!(config.gameplay.countdown_seconds, 1.5);
        assert_eq!(config.window.title, "ChargeJump");
    }
}
