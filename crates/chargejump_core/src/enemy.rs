//! Enemies patrolling platform perimeters
//!
//! An enemy's position is a pure function of its phase `angle` in [0, 1):
//! the fraction of the bound platform's perimeter travelled clockwise from
//! the top-left corner (top, right, bottom, left edges in order).

use chargejump_math::{Rect, Vec2};
use chargejump_physics::{PlatformId, PlayerPhysics};

use crate::config::GameplayConfig;
use crate::platform::{platform_by_id, Platform};

/// Below this length a push direction is considered degenerate
const DEGENERATE_DIRECTION: f32 = 1e-4;

/// One edge of a platform's boundary
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerimeterSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub length: f32,
}

impl PerimeterSegment {
    fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            length: start.distance(end),
        }
    }
}

/// Top, right, bottom and left edges of `rect`, walked clockwise
pub fn perimeter_segments(rect: &Rect) -> [PerimeterSegment; 4] {
    let tl = Vec2::new(rect.left(), rect.top());
    let tr = Vec2::new(rect.right(), rect.top());
    let br = Vec2::new(rect.right(), rect.bottom());
    let bl = Vec2::new(rect.left(), rect.bottom());
    [
        PerimeterSegment::new(tl, tr),
        PerimeterSegment::new(tr, br),
        PerimeterSegment::new(br, bl),
        PerimeterSegment::new(bl, tl),
    ]
}

/// A circular enemy walking around a platform's edge
#[derive(Clone, Debug)]
pub struct Enemy {
    pub platform: PlatformId,
    /// Fraction of the perimeter travelled, always in [0, 1)
    pub angle: f32,
    /// Speed along the perimeter (px/s)
    pub speed: f32,
    pub perimeter: f32,
    pub segments: [PerimeterSegment; 4],
    /// Circle center, derived from `angle`
    pub position: Vec2,
    pub radius: f32,
    pub active: bool,
}

/// Create an enemy on a platform; None if the platform does not exist
/// or has no perimeter
pub fn spawn_enemy(
    platforms: &[Platform],
    platform: PlatformId,
    speed: f32,
    radius: f32,
) -> Option<Enemy> {
    let rect = platform_by_id(platforms, platform)?.rect;
    if !rect.is_valid() {
        return None;
    }

    let mut enemy = Enemy {
        platform,
        angle: 0.0,
        speed,
        perimeter: 0.0,
        segments: perimeter_segments(&rect),
        position: rect.position(),
        radius,
        active: true,
    };
    enemy.rebuild(&rect);
    Some(enemy)
}

impl Enemy {
    /// Recompute segments from the platform rect and position from `angle`
    pub fn rebuild(&mut self, rect: &Rect) {
        self.segments = perimeter_segments(rect);
        self.perimeter = 2.0 * (rect.w + rect.h);
        self.position = self.position_at(self.angle);
    }

    /// Point on the perimeter at phase `angle`
    pub fn position_at(&self, angle: f32) -> Vec2 {
        let mut remaining = angle * self.perimeter;
        for segment in &self.segments {
            if remaining <= segment.length {
                if segment.length <= 0.0 {
                    return segment.start;
                }
                return segment.start.lerp(segment.end, remaining / segment.length);
            }
            remaining -= segment.length;
        }
        self.segments[0].start
    }

    /// Advance the phase by `speed / perimeter * dt` and follow the platform
    pub fn advance(&mut self, rect: &Rect, dt: f32) {
        self.segments = perimeter_segments(rect);
        self.perimeter = 2.0 * (rect.w + rect.h);
        if self.perimeter > 0.0 {
            self.angle = wrap_phase(self.angle + self.speed / self.perimeter * dt);
        }
        self.position = self.position_at(self.angle);
    }

    /// Whether the circle overlaps the axis-aligned box
    pub fn touches(&self, rect: &Rect) -> bool {
        let dx = (rect.left() - self.position.x)
            .max(self.position.x - rect.right())
            .max(0.0);
        let dy = (rect.top() - self.position.y)
            .max(self.position.y - rect.bottom())
            .max(0.0);
        dx * dx + dy * dy < self.radius * self.radius
    }
}

fn wrap_phase(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Advance every enemy along its platform
pub fn drive_enemies(enemies: &mut [Enemy], platforms: &[Platform], dt: f32) {
    for enemy in enemies.iter_mut() {
        if let Some(platform) = platform_by_id(platforms, enemy.platform) {
            enemy.advance(&platform.rect, dt);
        }
    }
}

/// Push the player away from any touching enemy
///
/// The cooldown is checked against the first active enemy visited: while the
/// player is still within the invincibility window of the last push, the
/// whole pass ends there. Returns true if a push was applied.
pub fn push_player(
    enemies: &[Enemy],
    platforms: &[Platform],
    player: &mut PlayerPhysics,
    last_push: &mut Option<f64>,
    now: f64,
    config: &GameplayConfig,
) -> bool {
    let mut pushed = false;

    for enemy in enemies.iter().filter(|e| e.active) {
        if let Some(at) = *last_push {
            if now - at < config.invincibility_seconds as f64 {
                return pushed;
            }
        }

        let player_rect = player.rect();
        if !enemy.touches(&player_rect) {
            continue;
        }

        let player_center = player_rect.center();
        let mut dir = player_center - enemy.position;
        if dir.length() < DEGENERATE_DIRECTION {
            dir = platform_by_id(platforms, enemy.platform)
                .map(|p| player_center - p.rect.center())
                .unwrap_or(Vec2::ZERO);
        }
        let dir = if dir.length() < DEGENERATE_DIRECTION {
            Vec2::X
        } else {
            dir.normalized()
        };

        player.velocity = dir * config.enemy_push_force;
        player.velocity.y = player.velocity.y.min(-config.min_upward_push);
        player.on_ground = false;
        player.current_platform = None;

        *last_push = Some(now);
        pushed = true;
        log::debug!(
            "Enemy on platform {:?} pushed player to velocity ({:.1}, {:.1})",
            enemy.platform,
            player.velocity.x,
            player.velocity.y
        );
    }

    pushed
}
