//! 2D Physics simulation for ChargeJump
//!
//! This crate provides the platformer physics core, including:
//! - A collision world with a spatial-hash broadphase and swept AABB narrowphase
//! - Collision filtering via a pluggable strategy (solid / passthrough / none)
//! - Contact response (grounding, ceiling stops, wall bounce, landing slide)
//! - Player kinematics for charge-and-release jumping

pub mod body;
pub mod collision;
pub mod player;
pub mod response;
pub mod surface;
pub mod world;

// Re-export commonly used types
pub use body::{Collider, ColliderKey, ColliderTag, PlatformId};
pub use collision::{
    sweep_rect, CollisionFilter, CollisionResponse, Contact, PlatformerFilter, SweepHit,
    ONE_WAY_EPSILON,
};
pub use player::{
    charge_ratio, ease_out_cubic, jump_speed_for_charge, JumpLaunch, MovementConfig, PlayerPhysics,
};
pub use response::{resolve_contacts, ResponseOutcome};
pub use surface::SurfaceFlags;
pub use world::{CollisionWorld, MoveResult, WorldConfig};
