//! The simulation context and its per-frame tick

use chargejump_math::Vec2;
use chargejump_physics::{
    resolve_contacts, Collider, ColliderKey, ColliderTag, CollisionWorld, JumpLaunch,
    MovementConfig, PlatformerFilter, PlayerPhysics,
};

use crate::checkpoint::CheckpointTracker;
use crate::config::GameplayConfig;
use crate::enemy::{drive_enemies, push_player, Enemy};
use crate::input::FrameInput;
use crate::layout::LevelLayout;
use crate::level::Level;
use crate::persistence::{CheckpointSave, ProgressStore};
use crate::platform::{drive_platforms, Platform, PlatformMotion};
use crate::snapshot::{CheckpointView, EnemyView, PlatformView, RenderSnapshot};
use crate::timer::{format_time, CompletedRun, RunPhase, SpeedrunTimer, TimedOverlay};

/// What happened during one tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The countdown expired and the run began
    pub run_started: bool,
    /// Restarted from spawn; the countdown is running again
    pub restarted: bool,
    pub timer_restarted: bool,
    pub launch: Option<JumpLaunch>,
    pub landed: bool,
    pub checkpoint_reached: Option<usize>,
    pub finished: Option<CompletedRun>,
    pub pushed: bool,
    /// Fell below the kill plane and respawned
    pub respawned: bool,
}

/// A running game: level entities, player, timer and progress
///
/// Owns every piece of simulation state; nothing is global. One call to
/// [`GameSession::tick`] advances one frame.
pub struct GameSession {
    level_name: String,
    movement: MovementConfig,
    gameplay: GameplayConfig,
    world: CollisionWorld,
    filter: PlatformerFilter,
    player: PlayerPhysics,
    player_key: ColliderKey,
    spawn: Vec2,
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    tracker: CheckpointTracker,
    timer: SpeedrunTimer,
    countdown: TimedOverlay,
    finish_display: TimedOverlay,
    /// Session clock (s), advanced by the unclamped frame time
    clock: f64,
    last_push: Option<f64>,
    camera: Vec2,
    kill_plane_y: f32,
    store: Box<dyn ProgressStore>,
}

impl GameSession {
    /// Build a session for `level` and start the countdown
    ///
    /// A saved checkpoint for the same level is resumed.
    pub fn new(
        level: &Level,
        movement: MovementConfig,
        gameplay: GameplayConfig,
        store: Box<dyn ProgressStore>,
    ) -> Self {
        let layout = LevelLayout::build(level, &gameplay);
        let mut world = CollisionWorld::new();

        let mut platforms = layout.platforms;
        for platform in platforms.iter_mut().filter(|p| p.is_collidable()) {
            platform.collider = Some(world.insert(Collider::platform(
                platform.id,
                platform.rect,
                platform.surface,
            )));
        }
        for (index, rect) in layout.checkpoints.iter().enumerate() {
            world.insert(Collider::checkpoint(index, *rect));
        }
        if let Some(rect) = layout.finish {
            world.insert(Collider::finish(rect));
        }

        let mut tracker = CheckpointTracker::new(layout.checkpoints, layout.finish);
        let mut player = PlayerPhysics::new(layout.spawn, movement.player_size());

        if let Some(save) = store.load_checkpoint() {
            if save.level == layout.name && tracker.restore(save.index) {
                log::info!(
                    "Resuming level '{}' from checkpoint {}",
                    layout.name,
                    save.index
                );
                player.position = save.position;
                player.last_checkpoint = save.position;
            }
        }

        let player_key = world.insert(Collider::player(player.rect()));
        let timer = SpeedrunTimer::new(store.load_best_time());
        let mut countdown = TimedOverlay::default();
        countdown.start(0.0, f64::from(gameplay.countdown_seconds));

        Self {
            level_name: layout.name,
            camera: player.center(),
            kill_plane_y: layout.bounds.bottom() + gameplay.kill_plane_margin,
            movement,
            gameplay,
            world,
            filter: PlatformerFilter,
            player,
            player_key,
            spawn: layout.spawn,
            platforms,
            enemies: layout.enemies,
            tracker,
            timer,
            countdown,
            finish_display: TimedOverlay::default(),
            clock: 0.0,
            last_push: None,
            store,
        }
    }

    /// Advance the simulation by one frame
    ///
    /// `dt` advances the session clock as given; physics uses it clamped to
    /// `GameplayConfig::max_dt`. Restart commands apply at any time; while
    /// the countdown is active nothing else runs.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        self.clock += f64::from(dt.max(0.0));
        let now = self.clock;

        if input.restart_from_spawn {
            self.restart_from_spawn();
            report.restarted = true;
            return report;
        }
        if input.restart_timer {
            self.restart_timer();
            report.timer_restarted = true;
        }

        if self.countdown.is_active() {
            if self.countdown.update(now) {
                self.timer.start(now);
                report.run_started = true;
                log::info!("Run started on level '{}'", self.level_name);
            }
            return report;
        }

        self.finish_display.update(now);
        self.timer.update(now);

        let dt = self.gameplay.step_dt(dt);

        let motions = drive_platforms(&mut self.platforms, &mut self.world, dt);
        if self.gameplay.carry_on_moving_platforms {
            self.carry_player(&motions);
        }

        report.launch = self
            .player
            .integrate(input.axis(), input.jump_held, &self.movement, dt);

        let goal = self.player.goal_position(dt);
        let contacts = match self.world.move_collider(
            self.player_key,
            goal,
            self.player.velocity,
            &self.filter,
        ) {
            Some(result) => {
                self.player.position = result.rect.position();
                result.contacts
            }
            None => {
                log::warn!("Player collider missing from the collision world");
                Vec::new()
            }
        };

        let response = resolve_contacts(&mut self.player, &contacts, &self.movement);
        report.landed = response.landed;
        for tag in response.triggers {
            self.handle_trigger(tag, now, &mut report);
        }

        drive_enemies(&mut self.enemies, &self.platforms, dt);
        report.pushed = push_player(
            &self.enemies,
            &self.platforms,
            &mut self.player,
            &mut self.last_push,
            now,
            &self.gameplay,
        );

        if self.player.rect().top() > self.kill_plane_y {
            self.respawn_at_checkpoint();
            report.respawned = true;
        }

        self.update_camera(dt);
        report
    }

    fn carry_player(&mut self, motions: &[PlatformMotion]) {
        if !self.player.on_ground {
            return;
        }
        let Some(id) = self.player.current_platform else {
            return;
        };
        if let Some(motion) = motions.iter().find(|m| m.id == id) {
            self.player.position += motion.displacement;
            self.sync_player_collider();
        }
    }

    fn handle_trigger(&mut self, tag: ColliderTag, now: f64, report: &mut TickReport) {
        match tag {
            ColliderTag::Checkpoint(index) => {
                if !self.tracker.reach(index) {
                    return;
                }
                self.player.last_checkpoint = self.player.position;
                report.checkpoint_reached = Some(index);
                log::info!("Reached checkpoint {} on level '{}'", index, self.level_name);

                let save = CheckpointSave {
                    level: self.level_name.clone(),
                    index,
                    position: self.player.last_checkpoint,
                };
                if let Err(e) = self.store.save_checkpoint(&save) {
                    log::warn!("Failed to save checkpoint: {}", e);
                }
            }
            ColliderTag::Finish => {
                let Some(run) = self.timer.complete(now) else {
                    return;
                };
                self.finish_display
                    .start(now, f64::from(self.gameplay.finish_display_seconds));
                if run.new_best {
                    log::info!("Run completed in {} (new best)", format_time(run.time));
                } else {
                    log::info!(
                        "Run completed in {} (best {})",
                        format_time(run.time),
                        format_time(run.best_time)
                    );
                }
                if let Err(e) = self.store.save_best_time(run.best_time) {
                    log::warn!("Failed to save best time: {}", e);
                }
                report.finished = Some(run);
            }
            ColliderTag::Player | ColliderTag::Platform(_) => {}
        }
    }

    fn respawn_at_checkpoint(&mut self) {
        let position = self.player.last_checkpoint;
        log::info!("Player fell out of the level; respawning at ({}, {})", position.x, position.y);
        self.player.respawn(position);
        self.sync_player_collider();
    }

    fn update_camera(&mut self, dt: f32) {
        let target = self.player.center();
        let alpha = 1.0 - (-self.gameplay.camera_follow_rate * dt).exp();
        self.camera = self.camera.lerp(target, alpha.clamp(0.0, 1.0));
    }

    fn sync_player_collider(&mut self) {
        self.world.update(self.player_key, self.player.rect());
    }

    /// Back to spawn with progress cleared and the countdown restarted
    pub fn restart_from_spawn(&mut self) {
        self.tracker.reset();
        self.player.respawn(self.spawn);
        self.player.last_checkpoint = self.spawn;
        self.sync_player_collider();
        if let Err(e) = self.store.clear_checkpoint() {
            log::warn!("Failed to clear checkpoint save: {}", e);
        }

        self.timer.reset();
        self.finish_display.stop();
        self.countdown
            .start(self.clock, f64::from(self.gameplay.countdown_seconds));
        self.last_push = None;
        log::info!("Restarted level '{}' from spawn", self.level_name);
    }

    /// Restart the timer only, skipping the countdown
    pub fn restart_timer(&mut self) {
        self.countdown.stop();
        self.timer.reset();
        self.timer.start(self.clock);
        log::info!("Timer restarted");
    }

    /// Move the player without collision checks
    pub fn teleport_player(&mut self, position: Vec2) {
        self.player.position = position;
        self.sync_player_collider();
    }

    pub fn phase(&self) -> RunPhase {
        if self.countdown.is_active() {
            RunPhase::Countdown
        } else if self.timer.is_running() {
            RunPhase::Running
        } else if self.timer.is_completed() {
            RunPhase::Completed
        } else {
            RunPhase::Idle
        }
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            player: self.player.rect(),
            platforms: self
                .platforms
                .iter()
                .map(|p| PlatformView {
                    id: p.id,
                    rect: p.rect,
                    one_way: p.surface.is_one_way(),
                    ice: p.surface.is_ice(),
                    moving: p.is_moving(),
                    collidable: p.is_collidable(),
                    platform_type: p.platform_type.clone(),
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .filter(|e| e.active)
                .map(|e| EnemyView {
                    position: e.position,
                    radius: e.radius,
                })
                .collect(),
            checkpoints: self
                .tracker
                .checkpoints()
                .iter()
                .enumerate()
                .map(|(i, rect)| CheckpointView {
                    rect: *rect,
                    reached: self.tracker.is_reached(i),
                })
                .collect(),
            finish: self.tracker.finish(),
            camera: self.camera,
            charge_ratio: self.player.display_charge(&self.movement),
            timer_text: format_time(self.timer.current_time()),
            best_text: self.timer.best_time().map(format_time),
            countdown: self
                .countdown
                .is_active()
                .then(|| self.countdown.time_left()),
            finish_display: self
                .finish_display
                .is_active()
                .then(|| self.finish_display.time_left()),
            phase: self.phase(),
        }
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn player(&self) -> &PlayerPhysics {
        &self.player
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn tracker(&self) -> &CheckpointTracker {
        &self.tracker
    }

    pub fn timer(&self) -> &SpeedrunTimer {
        &self.timer
    }

    pub fn countdown(&self) -> &TimedOverlay {
        &self.countdown
    }

    pub fn finish_display(&self) -> &TimedOverlay {
        &self.finish_display
    }

    /// Session clock (s)
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    pub fn kill_plane_y(&self) -> f32 {
        self.kill_plane_y
    }

    pub fn movement(&self) -> &MovementConfig {
        &self.movement
    }

    pub fn gameplay(&self) -> &GameplayConfig {
        &self.gameplay
    }

    pub fn store(&self) -> &dyn ProgressStore {
        self.store.as_ref()
    }
}
