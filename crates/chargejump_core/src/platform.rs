//! Platforms and the moving-platform driver

use chargejump_math::{Rect, Vec2};
use chargejump_physics::{ColliderKey, CollisionWorld, PlatformId, SurfaceFlags};

/// Distance at which a moving platform counts as having reached a waypoint
pub const ARRIVE_DISTANCE: f32 = 1.0;

/// Waypoint traversal state of a moving platform
///
/// Waypoints are absolute top-left positions of the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformPath {
    waypoints: Vec<Vec2>,
    /// Travel speed (px/s)
    pub speed: f32,
    /// Wrap to the first waypoint instead of reversing at the ends
    pub looping: bool,
    next_idx: usize,
    dir: i32,
}

impl PlatformPath {
    /// Build a path; returns None for fewer than two points or zero total length
    pub fn new(waypoints: Vec<Vec2>, speed: f32, looping: bool) -> Option<Self> {
        if waypoints.len() < 2 {
            return None;
        }
        let length: f32 = waypoints.windows(2).map(|w| w[0].distance(w[1])).sum();
        if length <= 0.0 {
            return None;
        }
        Some(Self {
            waypoints,
            speed,
            looping,
            next_idx: 1,
            dir: 1,
        })
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Position the platform starts at
    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    /// Index of the waypoint currently targeted
    pub fn next_idx(&self) -> usize {
        self.next_idx
    }

    /// +1 forward, -1 backward
    pub fn dir(&self) -> i32 {
        self.dir
    }

    fn advance(&mut self) {
        let len = self.waypoints.len();
        if self.looping {
            self.next_idx = (self.next_idx + 1) % len;
            return;
        }

        let next = self.next_idx as i64 + self.dir as i64;
        if next >= len as i64 {
            self.dir = -1;
            self.next_idx = len - 2;
        } else if next < 0 {
            self.dir = 1;
            self.next_idx = 1;
        } else {
            self.next_idx = next as usize;
        }
    }

    /// Step from `position` toward the current target; returns the new position
    ///
    /// Never moves further than `speed * dt` and never overshoots the target.
    pub fn step(&mut self, position: Vec2, dt: f32) -> Vec2 {
        if position.distance(self.waypoints[self.next_idx]) <= ARRIVE_DISTANCE {
            self.advance();
        }

        let target = self.waypoints[self.next_idx];
        let to_target = target - position;
        let distance = to_target.length();
        let max_step = (self.speed * dt).max(0.0);

        if distance <= max_step {
            target
        } else {
            position + to_target * (max_step / distance)
        }
    }
}

/// A platform in the level
#[derive(Clone, Debug)]
pub struct Platform {
    pub id: PlatformId,
    pub rect: Rect,
    pub surface: SurfaceFlags,
    pub platform_type: Option<String>,
    pub path: Option<PlatformPath>,
    /// Collision world entry; None for visual-only or non-collidable platforms
    pub collider: Option<ColliderKey>,
}

impl Platform {
    pub fn new(id: PlatformId, rect: Rect, surface: SurfaceFlags) -> Self {
        Self {
            id,
            rect,
            surface,
            platform_type: None,
            path: None,
            collider: None,
        }
    }

    /// Attach a path, moving the platform to its first waypoint
    pub fn with_path(mut self, path: PlatformPath) -> Self {
        self.rect = self.rect.with_position(path.start());
        self.path = Some(path);
        self
    }

    pub fn with_type(mut self, platform_type: Option<String>) -> Self {
        self.platform_type = platform_type;
        self
    }

    pub fn is_moving(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_collidable(&self) -> bool {
        self.surface.is_collidable()
    }

    /// Advance along the path; returns the displacement this frame
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let Some(path) = self.path.as_mut() else {
            return Vec2::ZERO;
        };
        let old = self.rect.position();
        let new = path.step(old, dt);
        self.rect = self.rect.with_position(new);
        new - old
    }
}

/// Displacement of one moving platform during a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformMotion {
    pub id: PlatformId,
    pub displacement: Vec2,
}

/// Advance every moving platform and sync its collision world entry
pub fn drive_platforms(
    platforms: &mut [Platform],
    world: &mut CollisionWorld,
    dt: f32,
) -> Vec<PlatformMotion> {
    let mut motions = Vec::new();
    for platform in platforms.iter_mut().filter(|p| p.is_moving()) {
        let displacement = platform.advance(dt);
        if let Some(key) = platform.collider {
            world.update(key, platform.rect);
        }
        motions.push(PlatformMotion {
            id: platform.id,
            displacement,
        });
    }
    motions
}

/// Look up a platform by id
///
/// Ids are assigned as indices when a level is built.
pub fn platform_by_id(platforms: &[Platform], id: PlatformId) -> Option<&Platform> {
    platforms
        .get(id.0 as usize)
        .filter(|p| p.id == id)
        .or_else(|| platforms.iter().find(|p| p.id == id))
}
