//! Turning a level's object list into gameplay entities

use chargejump_math::{Rect, Vec2};
use chargejump_physics::{PlatformId, SurfaceFlags};

use crate::config::GameplayConfig;
use crate::enemy::{spawn_enemy, Enemy};
use crate::level::{Level, LevelObject};
use crate::platform::{Platform, PlatformPath};
use crate::properties::ObjectProperties;

/// Size given to checkpoint and finish volumes that carry no size of their own
pub const DEFAULT_TRIGGER_SIZE: Vec2 = Vec2::new(24.0, 8.0);

/// Size given to path-driven platforms with no size of their own
pub const DEFAULT_MOVING_PLATFORM_SIZE: Vec2 = Vec2::new(64.0, 12.0);

/// Gameplay entities extracted from a level
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub name: String,
    pub spawn: Vec2,
    /// Platforms indexed by their id
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    /// Checkpoint volumes in level order
    pub checkpoints: Vec<Rect>,
    pub finish: Option<Rect>,
    /// Union of every platform rect and the spawn point
    pub bounds: Rect,
}

impl LevelLayout {
    /// Classify every object of `level` by role
    ///
    /// Objects named or typed `spawn`/`finish` become the spawn point and the
    /// finish volume, `checkpoint` objects become checkpoints, and everything
    /// else is a platform. Platforms with a non-positive size and no path are
    /// skipped.
    pub fn build(level: &Level, gameplay: &GameplayConfig) -> Self {
        let mut spawn = None;
        let mut finish = None;
        let mut checkpoints = Vec::new();
        let mut platforms: Vec<Platform> = Vec::new();
        let mut enemy_requests: Vec<(PlatformId, Option<f32>)> = Vec::new();

        for object in &level.objects {
            let props = ObjectProperties::resolve(&object.properties);

            if object.is_named("spawn") {
                spawn = Some(Vec2::new(object.x, object.y));
                continue;
            }
            if object.is_named("finish") {
                if finish.is_some() {
                    log::warn!("Level '{}' has more than one finish; keeping the last", level.name);
                }
                finish = Some(trigger_rect(object));
                continue;
            }
            if object.is_named("checkpoint") || props.checkpoint {
                checkpoints.push(trigger_rect(object));
                continue;
            }

            let id = PlatformId(platforms.len() as u32);
            let Some(platform) = build_platform(id, object, &props, gameplay) else {
                log::debug!(
                    "Skipping malformed object '{}' at ({}, {}) size {}x{}",
                    object.name,
                    object.x,
                    object.y,
                    object.w,
                    object.h
                );
                continue;
            };
            if props.enemy {
                enemy_requests.push((id, props.radius));
            }
            platforms.push(platform);
        }

        let enemies = enemy_requests
            .into_iter()
            .filter_map(|(id, radius)| {
                spawn_enemy(
                    &platforms,
                    id,
                    gameplay.enemy_speed,
                    radius.unwrap_or(gameplay.enemy_radius),
                )
            })
            .collect::<Vec<_>>();

        let spawn = spawn.unwrap_or_else(|| {
            log::warn!("Level '{}' has no spawn point; using the origin", level.name);
            Vec2::ZERO
        });

        let bounds = platforms
            .iter()
            .map(level_extent)
            .fold(Rect::from_position_size(spawn, Vec2::ZERO), |acc, r| acc.union(&r));

        log::info!(
            "Built level '{}': {} platforms, {} enemies, {} checkpoints, finish {}",
            level.name,
            platforms.len(),
            enemies.len(),
            checkpoints.len(),
            if finish.is_some() { "present" } else { "missing" }
        );

        Self {
            name: level.name.clone(),
            spawn,
            platforms,
            enemies,
            checkpoints,
            finish,
            bounds,
        }
    }
}

fn trigger_rect(object: &LevelObject) -> Rect {
    if object.w > 0.0 && object.h > 0.0 {
        Rect::new(object.x, object.y, object.w, object.h)
    } else {
        Rect::from_position_size(Vec2::new(object.x, object.y), DEFAULT_TRIGGER_SIZE)
    }
}

fn build_platform(
    id: PlatformId,
    object: &LevelObject,
    props: &ObjectProperties,
    gameplay: &GameplayConfig,
) -> Option<Platform> {
    let has_size = object.w > 0.0 && object.h > 0.0;
    let has_path = object.path.as_ref().is_some_and(|p| !p.is_empty());
    if !has_size && !has_path {
        return None;
    }

    let size = Vec2::new(
        props
            .width
            .filter(|w| *w > 0.0)
            .unwrap_or(if has_size { object.w } else { DEFAULT_MOVING_PLATFORM_SIZE.x }),
        props
            .height
            .filter(|h| *h > 0.0)
            .unwrap_or(if has_size { object.h } else { DEFAULT_MOVING_PLATFORM_SIZE.y }),
    );
    let rect = Rect::from_position_size(Vec2::new(object.x, object.y), size);

    let mut surface = SurfaceFlags::empty();
    if props.is_collidable() {
        surface |= SurfaceFlags::COLLIDABLE;
    }
    if props.one_way {
        surface |= SurfaceFlags::ONE_WAY;
    }
    if props.ice {
        surface |= SurfaceFlags::ICE;
    }

    let platform = Platform::new(id, rect, surface).with_type(props.platform_type.clone());

    if !props.moving {
        return Some(platform);
    }

    let waypoints = object
        .path
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|&p| Vec2::from(p))
        .collect();
    let speed = props.speed.unwrap_or(gameplay.moving_platform_speed);
    match PlatformPath::new(waypoints, speed, props.looping) {
        Some(path) => Some(platform.with_path(path)),
        None => {
            log::debug!(
                "Moving object '{}' has no usable path; treating it as static",
                object.name
            );
            Some(platform)
        }
    }
}

/// Area a platform can occupy, including its whole path
fn level_extent(platform: &Platform) -> Rect {
    match &platform.path {
        Some(path) => path
            .waypoints()
            .iter()
            .fold(platform.rect, |acc, &wp| acc.union(&platform.rect.with_position(wp))),
        None => platform.rect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_level_layout() {
        let layout = LevelLayout::build(&Level::sample(), &GameplayConfig::default());

        assert_eq!(layout.spawn, Vec2::new(40.0, 520.0));
        assert_eq!(layout.checkpoints.len(), 2);
        assert!(layout.finish.is_some());
        assert_eq!(layout.enemies.len(), 1);
        assert_eq!(layout.platforms.iter().filter(|p| p.is_moving()).count(), 2);
        for (i, platform) in layout.platforms.iter().enumerate() {
            assert_eq!(platform.id, PlatformId(i as u32));
        }
    }

    #[test]
    fn test_roles_and_flags() {
        let level = Level::new("roles")
            .with_object(LevelObject::new(5.0, 6.0, 0.0, 0.0).with_kind("spawn"))
            .with_object(LevelObject::new(0.0, 100.0, 50.0, 10.0).with_property("oneWay", true))
            .with_object(LevelObject::new(0.0, 200.0, 50.0, 10.0).with_property("slippery", true))
            .with_object(LevelObject::new(0.0, 300.0, 50.0, 10.0).with_property("visual_only", true))
            .with_object(LevelObject::new(60.0, 90.0, 0.0, 0.0).with_property("checkpoint", true))
            .with_object(LevelObject::new(90.0, 90.0, 30.0, 30.0).with_name("Finish"));

        let layout = LevelLayout::build(&level, &GameplayConfig::default());

        assert_eq!(layout.spawn, Vec2::new(5.0, 6.0));
        assert_eq!(layout.platforms.len(), 3);
        assert!(layout.platforms[0].surface.is_one_way());
        assert!(layout.platforms[1].surface.is_ice());
        assert!(!layout.platforms[2].is_collidable());
        assert_eq!(layout.checkpoints, vec![Rect::new(60.0, 90.0, 24.0, 8.0)]);
        assert_eq!(layout.finish, Some(Rect::new(90.0, 90.0, 30.0, 30.0)));
    }

    #[test]
    fn test_degenerate_objects_are_skipped() {
        let level = Level::new("bad")
            .with_object(LevelObject::new(0.0, 0.0, 0.0, 10.0))
            .with_object(LevelObject::new(0.0, 0.0, 10.0, -1.0))
            .with_object(LevelObject::new(0.0, 0.0, 10.0, 10.0));

        let layout = LevelLayout::build(&level, &GameplayConfig::default());
        assert_eq!(layout.platforms.len(), 1);
        assert_eq!(layout.platforms[0].id, PlatformId(0));
    }

    #[test]
    fn test_moving_without_valid_path_is_static() {
        let level = Level::new("m")
            .with_object(
                LevelObject::new(0.0, 0.0, 40.0, 10.0)
                    .with_property("moving", true)
                    .with_path(vec![[0.0, 0.0], [0.0, 0.0]]),
            )
            .with_object(LevelObject::new(0.0, 50.0, 40.0, 10.0).with_property("moving", true));

        let layout = LevelLayout::build(&level, &GameplayConfig::default());
        assert_eq!(layout.platforms.len(), 2);
        assert!(layout.platforms.iter().all(|p| !p.is_moving()));
    }

    #[test]
    fn test_path_only_platform_uses_size_properties() {
        let level = Level::new("p").with_object(
            LevelObject::new(0.0, 0.0, 0.0, 0.0)
                .with_property("moving", true)
                .with_property("width", 80i64)
                .with_property("speed", 25.0)
                .with_path(vec![[10.0, 10.0], [110.0, 10.0]]),
        );

        let layout = LevelLayout::build(&level, &GameplayConfig::default());
        let platform = &layout.platforms[0];
        assert_eq!(platform.rect, Rect::new(10.0, 10.0, 80.0, 12.0));
        assert_eq!(platform.path.as_ref().unwrap().speed, 25.0);
        assert_eq!(layout.bounds.right(), 190.0);
    }

    #[test]
    fn test_enemy_radius_from_property() {
        let level = Level::new("e").with_object(
            LevelObject::new(0.0, 0.0, 100.0, 20.0)
                .with_property("enemy", true)
                .with_property("radius", 14i64),
        );

        let layout = LevelLayout::build(&level, &GameplayConfig::default());
        assert_eq!(layout.enemies.len(), 1);
        assert_eq!(layout.enemies[0].radius, 14.0);
        assert_eq!(layout.enemies[0].platform, PlatformId(0));
    }
}
