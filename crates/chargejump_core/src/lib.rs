//! Gameplay core for ChargeJump
//!
//! This crate turns a level description into a running simulation:
//!
//! - [`Level`] / [`LevelObject`] - Loadable/saveable object list of a map
//! - [`ObjectProperties`] - Typed view of an object's property bag
//! - [`LevelLayout`] - Spawn, platforms, enemies, checkpoints and finish of a level
//! - [`Platform`] / [`PlatformPath`] - Static and waypoint-driven platforms
//! - [`Enemy`] - Perimeter-walking enemies that push the player away
//! - [`CheckpointTracker`] - Monotonic checkpoint progress
//! - [`SpeedrunTimer`] / [`TimedOverlay`] - Run timing, countdown and finish overlay
//! - [`ProgressStore`] - Best time and checkpoint persistence
//! - [`GameSession`] - The simulation context and its per-frame tick
//! - [`RenderSnapshot`] - Read-only state for presentation

mod checkpoint;
mod config;
mod enemy;
mod input;
mod layout;
mod level;
mod persistence;
mod platform;
mod properties;
mod session;
mod snapshot;
mod timer;

pub use checkpoint::CheckpointTracker;
pub use config::GameplayConfig;
pub use enemy::{drive_enemies, perimeter_segments, push_player, spawn_enemy, Enemy, PerimeterSegment};
pub use input::FrameInput;
pub use layout::{LevelLayout, DEFAULT_MOVING_PLATFORM_SIZE, DEFAULT_TRIGGER_SIZE};
pub use level::{Level, LevelLoadError, LevelObject, LevelSaveError};
pub use persistence::{
    CheckpointSave, FileStore, MemoryStore, ProgressStore, SaveError, BEST_TIME_FILE,
    CHECKPOINT_FILE,
};
pub use platform::{drive_platforms, platform_by_id, Platform, PlatformMotion, PlatformPath, ARRIVE_DISTANCE};
pub use properties::{ObjectProperties, PropertyValue};
pub use session::{GameSession, TickReport};
pub use snapshot::{CheckpointView, EnemyView, PlatformView, RenderSnapshot};
pub use timer::{format_time, CompletedRun, RunPhase, SpeedrunTimer, TimedOverlay};

// Re-export physics types for convenient access through chargejump_core
pub use chargejump_physics::{MovementConfig, PlatformId, PlayerPhysics, SurfaceFlags};
pub use chargejump_math::{Rect, Vec2};
