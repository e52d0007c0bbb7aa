//! Colliders stored in the collision world

use chargejump_math::Rect;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::surface::SurfaceFlags;

new_key_type! {
    /// Key to a collider in the collision world
    ///
    /// Generational: a key to a removed collider returns None rather than
    /// aliasing whatever reused the slot.
    pub struct ColliderKey;
}

/// Stable identifier of a platform within a level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

/// What a collider represents in gameplay terms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColliderTag {
    Player,
    Platform(PlatformId),
    /// Checkpoint volume carrying its ordinal index
    Checkpoint(usize),
    Finish,
}

impl ColliderTag {
    /// Checkpoints and the finish volume never block movement
    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, ColliderTag::Checkpoint(_) | ColliderTag::Finish)
    }

    #[inline]
    pub fn platform_id(self) -> Option<PlatformId> {
        match self {
            ColliderTag::Platform(id) => Some(id),
            _ => None,
        }
    }
}

/// An axis-aligned box registered in the collision world
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    /// World-space rectangle
    pub rect: Rect,
    pub tag: ColliderTag,
    /// Surface behavior (meaningful for platforms)
    pub surface: SurfaceFlags,
}

impl Collider {
    pub fn player(rect: Rect) -> Self {
        Self {
            rect,
            tag: ColliderTag::Player,
            surface: SurfaceFlags::COLLIDABLE,
        }
    }

    pub fn platform(id: PlatformId, rect: Rect, surface: SurfaceFlags) -> Self {
        Self {
            rect,
            tag: ColliderTag::Platform(id),
            surface,
        }
    }

    pub fn checkpoint(index: usize, rect: Rect) -> Self {
        Self {
            rect,
            tag: ColliderTag::Checkpoint(index),
            surface: SurfaceFlags::empty(),
        }
    }

    pub fn finish(rect: Rect) -> Self {
        Self {
            rect,
            tag: ColliderTag::Finish,
            surface: SurfaceFlags::empty(),
        }
    }
}
