//! Collision detection for axis-aligned boxes
//!
//! Provides the swept AABB test used by the collision world, the contact
//! record it produces, and collision filtering via a strategy trait.

use crate::body::{Collider, ColliderKey, ColliderTag};
use crate::surface::SurfaceFlags;
use chargejump_math::{Rect, Vec2};

/// Tolerance when comparing the mover's feet against a one-way platform's top
pub const ONE_WAY_EPSILON: f32 = 0.5;

/// Tolerance for time-of-impact comparisons
const TOI_EPSILON: f32 = 1e-6;

/// How the world treats a pair during a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Block and slide along the contact surface
    Solid,
    /// Record the contact without blocking
    Passthrough,
    /// Ignore the pair entirely
    None,
}

/// Strategy deciding how a moving collider interacts with another
///
/// Called once per candidate pair during a move. `velocity` is the mover's
/// velocity for this frame, and `mover.rect` is its rectangle before the move.
pub trait CollisionFilter {
    fn classify(&self, mover: &Collider, other: &Collider, velocity: Vec2) -> CollisionResponse;
}

/// Filter implementing the platformer rules
///
/// - Checkpoint and finish volumes are passthrough for the player and never
///   block it, whatever their size; nothing can stand on a checkpoint
/// - Non-collidable platforms are ignored
/// - One-way platforms are solid only when the mover's feet start at or above
///   the platform top and it is not moving upward
/// - Every other platform is solid
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformerFilter;

impl CollisionFilter for PlatformerFilter {
    fn classify(&self, mover: &Collider, other: &Collider, velocity: Vec2) -> CollisionResponse {
        if other.tag.is_trigger() {
            return if mover.tag == ColliderTag::Player {
                CollisionResponse::Passthrough
            } else {
                CollisionResponse::None
            };
        }
        match other.tag {
            ColliderTag::Player | ColliderTag::Checkpoint(_) | ColliderTag::Finish => {
                CollisionResponse::None
            }
            ColliderTag::Platform(_) => {
                if !other.surface.is_collidable() {
                    return CollisionResponse::None;
                }
                if other.surface.is_one_way() {
                    let feet_above = mover.rect.bottom() <= other.rect.top() + ONE_WAY_EPSILON;
                    if feet_above && velocity.y >= 0.0 {
                        CollisionResponse::Solid
                    } else {
                        CollisionResponse::None
                    }
                } else {
                    CollisionResponse::Solid
                }
            }
        }
    }
}

/// A contact produced by a move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit axis normal pointing from the obstacle toward the mover
    pub normal: Vec2,
    pub other: ColliderKey,
    pub tag: ColliderTag,
    pub surface: SurfaceFlags,
    /// Mover's top-left position at the moment of contact
    pub touch: Vec2,
    /// Fraction of the move at contact; negative when overlapping at start
    pub time_of_impact: f32,
    pub response: CollisionResponse,
}

impl Contact {
    /// Obstacle is below the mover
    #[inline]
    pub fn is_ground(&self) -> bool {
        self.normal.y < 0.0
    }

    /// Obstacle is above the mover
    #[inline]
    pub fn is_ceiling(&self) -> bool {
        self.normal.y > 0.0
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.normal.x != 0.0
    }
}

/// Result of sweeping one box against another
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    pub time_of_impact: f32,
    pub normal: Vec2,
    pub touch: Vec2,
}

/// Sweep `moving` by `delta` against a static `obstacle`
///
/// Returns the earliest contact along the move, or an escape contact with a
/// negative time of impact if the boxes already overlap. Touching edges that
/// the move slides along do not count as hits.
pub fn sweep_rect(moving: &Rect, delta: Vec2, obstacle: &Rect) -> Option<SweepHit> {
    let diff = minkowski_difference(moving, obstacle);

    if diff.x < 0.0 && diff.right() > 0.0 && diff.y < 0.0 && diff.bottom() > 0.0 {
        return Some(escape_overlap(moving, obstacle, &diff));
    }

    let (t_enter, t_exit, normal) = clip_segment(&diff, delta)?;
    let hits = t_enter < 1.0
        && (t_enter - t_exit).abs() >= TOI_EPSILON
        && (t_enter + TOI_EPSILON > 0.0 || (t_enter == 0.0 && t_exit > 0.0));
    if !hits {
        return None;
    }

    let t = t_enter.max(0.0);
    Some(SweepHit {
        time_of_impact: t,
        normal,
        touch: snap_to_edge(moving.position() + delta * t, normal, moving, obstacle),
    })
}

/// Place the contact axis of `touch` exactly on the obstacle's face
fn snap_to_edge(mut touch: Vec2, normal: Vec2, moving: &Rect, obstacle: &Rect) -> Vec2 {
    if normal.x < 0.0 {
        touch.x = obstacle.left() - moving.w;
    } else if normal.x > 0.0 {
        touch.x = obstacle.right();
    }
    if normal.y < 0.0 {
        touch.y = obstacle.top() - moving.h;
    } else if normal.y > 0.0 {
        touch.y = obstacle.bottom();
    }
    touch
}

/// Minkowski difference of `obstacle` and `moving`, in the mover's frame
fn minkowski_difference(moving: &Rect, obstacle: &Rect) -> Rect {
    Rect::new(
        obstacle.x - moving.x - moving.w,
        obstacle.y - moving.y - moving.h,
        moving.w + obstacle.w,
        moving.h + obstacle.h,
    )
}

/// Liang-Barsky clip of the segment from the origin to `delta` against `diff`
///
/// Returns entry time, exit time and the normal of the entry side.
fn clip_segment(diff: &Rect, delta: Vec2) -> Option<(f32, f32, Vec2)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    let sides = [
        (Vec2::new(-1.0, 0.0), -delta.x, -diff.left()),
        (Vec2::new(1.0, 0.0), delta.x, diff.right()),
        (Vec2::new(0.0, -1.0), -delta.y, -diff.top()),
        (Vec2::new(0.0, 1.0), delta.y, diff.bottom()),
    ];

    for (side_normal, p, q) in sides {
        if p == 0.0 {
            if q <= 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t_exit {
                    return None;
                }
                if r > t_enter {
                    t_enter = r;
                    normal = side_normal;
                }
            } else {
                if r < t_enter {
                    return None;
                }
                if r < t_exit {
                    t_exit = r;
                }
            }
        }
    }

    Some((t_enter, t_exit, normal))
}

/// Minimum translation out of an overlap, preferring up, then down, left, right
fn escape_overlap(moving: &Rect, obstacle: &Rect, diff: &Rect) -> SweepHit {
    let candidates = [
        (Vec2::new(0.0, diff.top()), Vec2::new(0.0, -1.0)),
        (Vec2::new(0.0, diff.bottom()), Vec2::new(0.0, 1.0)),
        (Vec2::new(diff.left(), 0.0), Vec2::new(-1.0, 0.0)),
        (Vec2::new(diff.right(), 0.0), Vec2::new(1.0, 0.0)),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.0.length_squared() < best.0.length_squared() {
            best = *candidate;
        }
    }

    let (shift, normal) = best;
    SweepHit {
        time_of_impact: -shift.length(),
        normal,
        touch: snap_to_edge(moving.position() + shift, normal, moving, obstacle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::PlatformId;

    fn player_at(x: f32, y: f32) -> Collider {
        Collider::player(Rect::new(x, y, 10.0, 10.0))
    }

    #[test]
    fn test_sweep_landing_on_floor() {
        let mover = Rect::new(0.0, 0.0, 10.0, 10.0);
        let floor = Rect::new(-50.0, 20.0, 100.0, 10.0);
        let hit = sweep_rect(&mover, Vec2::new(0.0, 15.0), &floor).unwrap();

        assert!((hit.time_of_impact - 10.0 / 15.0).abs() < 0.0001);
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
        assert!((hit.touch.y - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_sweep_miss() {
        let mover = Rect::new(0.0, 0.0, 10.0, 10.0);
        let floor = Rect::new(-50.0, 40.0, 100.0, 10.0);
        assert!(sweep_rect(&mover, Vec2::new(0.0, 15.0), &floor).is_none());
    }

    #[test]
    fn test_sweep_resting_contact_at_time_zero() {
        let mover = Rect::new(0.0, 10.0, 10.0, 10.0);
        let floor = Rect::new(-50.0, 20.0, 100.0, 10.0);
        let hit = sweep_rect(&mover, Vec2::new(0.0, 1.0), &floor).unwrap();

        assert_eq!(hit.time_of_impact, 0.0);
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
        assert_eq!(hit.touch, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_sweep_wall_from_left() {
        let mover = Rect::new(0.0, 0.0, 10.0, 10.0);
        let wall = Rect::new(20.0, -50.0, 10.0, 100.0);
        let hit = sweep_rect(&mover, Vec2::new(20.0, 0.0), &wall).unwrap();

        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
        assert!((hit.touch.x - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_sweep_ceiling() {
        let mover = Rect::new(0.0, 20.0, 10.0, 10.0);
        let ceiling = Rect::new(-50.0, 0.0, 100.0, 10.0);
        let hit = sweep_rect(&mover, Vec2::new(0.0, -20.0), &ceiling).unwrap();

        assert_eq!(hit.normal, Vec2::new(0.0, 1.0));
        assert!((hit.touch.y - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_sliding_along_wall_is_not_a_hit() {
        // Mover's right edge is flush with the wall's left edge
        let mover = Rect::new(10.0, 0.0, 10.0, 10.0);
        let wall = Rect::new(20.0, -50.0, 10.0, 100.0);
        assert!(sweep_rect(&mover, Vec2::new(0.0, 5.0), &wall).is_none());
    }

    #[test]
    fn test_overlap_escapes_along_shallowest_axis() {
        // Sunk 2 units into the floor
        let mover = Rect::new(0.0, 12.0, 10.0, 10.0);
        let floor = Rect::new(-50.0, 20.0, 100.0, 10.0);
        let hit = sweep_rect(&mover, Vec2::ZERO, &floor).unwrap();

        assert!(hit.time_of_impact < 0.0);
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
        assert_eq!(hit.touch, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_stationary_non_overlapping_is_none() {
        let mover = Rect::new(0.0, 0.0, 10.0, 10.0);
        let other = Rect::new(100.0, 100.0, 10.0, 10.0);
        assert!(sweep_rect(&mover, Vec2::ZERO, &other).is_none());
    }

    #[test]
    fn test_filter_triggers_are_passthrough() {
        let filter = PlatformerFilter;
        let player = player_at(0.0, 0.0);
        let checkpoint = Collider::checkpoint(0, Rect::new(0.0, 0.0, 24.0, 8.0));
        let finish = Collider::finish(Rect::new(0.0, 0.0, 24.0, 8.0));

        assert_eq!(filter.classify(&player, &checkpoint, Vec2::ZERO), CollisionResponse::Passthrough);
        assert_eq!(filter.classify(&player, &finish, Vec2::ZERO), CollisionResponse::Passthrough);
    }

    #[test]
    fn test_filter_one_way_from_above_is_solid() {
        let filter = PlatformerFilter;
        let ledge = Collider::platform(
            PlatformId(0),
            Rect::new(0.0, 100.0, 50.0, 10.0),
            SurfaceFlags::COLLIDABLE | SurfaceFlags::ONE_WAY,
        );

        let above = player_at(0.0, 90.0);
        assert_eq!(filter.classify(&above, &ledge, Vec2::new(0.0, 50.0)), CollisionResponse::Solid);
    }

    #[test]
    fn test_filter_one_way_from_below_or_rising_is_ignored() {
        let filter = PlatformerFilter;
        let ledge = Collider::platform(
            PlatformId(0),
            Rect::new(0.0, 100.0, 50.0, 10.0),
            SurfaceFlags::COLLIDABLE | SurfaceFlags::ONE_WAY,
        );

        let below = player_at(0.0, 105.0);
        assert_eq!(filter.classify(&below, &ledge, Vec2::new(0.0, -200.0)), CollisionResponse::None);

        let above_rising = player_at(0.0, 90.0);
        assert_eq!(
            filter.classify(&above_rising, &ledge, Vec2::new(0.0, -10.0)),
            CollisionResponse::None
        );
    }

    #[test]
    fn test_filter_non_collidable_is_ignored() {
        let filter = PlatformerFilter;
        let ghost = Collider::platform(PlatformId(1), Rect::new(0.0, 0.0, 10.0, 10.0), SurfaceFlags::empty());
        assert_eq!(filter.classify(&player_at(0.0, 0.0), &ghost, Vec2::ZERO), CollisionResponse::None);
    }

    #[test]
    fn test_contact_orientation_helpers() {
        let contact = Contact {
            normal: Vec2::new(0.0, -1.0),
            other: ColliderKey::default(),
            tag: ColliderTag::Platform(PlatformId(0)),
            surface: SurfaceFlags::COLLIDABLE,
            touch: Vec2::ZERO,
            time_of_impact: 0.0,
            response: CollisionResponse::Solid,
        };
        assert!(contact.is_ground());
        assert!(!contact.is_ceiling());
        assert!(!contact.is_wall());
    }
}
