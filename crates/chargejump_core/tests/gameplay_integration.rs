//! Integration tests for the gameplay session
//!
//! These drive full `GameSession::tick` frames and verify:
//! 1. The countdown gates the simulation and starts the timer
//! 2. Landing, charging and releasing a jump
//! 3. Checkpoint progress, persistence and resume
//! 4. Run completion and best-time bookkeeping
//! 5. Restarts, kill plane respawn, moving platforms and enemies

use chargejump_core::{
    CheckpointSave, FrameInput, GameSession, GameplayConfig, Level, LevelObject, MemoryStore,
    MovementConfig, PlatformId, ProgressStore, RunPhase, Vec2,
};

const FRAME: f32 = 1.0 / 60.0;

/// Flat ground with two checkpoints and a finish, player resting at spawn
fn test_level() -> Level {
    Level::new("test")
        .with_object(LevelObject::new(0.0, 72.0, 0.0, 0.0).with_name("spawn"))
        .with_object(LevelObject::new(-500.0, 100.0, 2000.0, 20.0).with_name("ground"))
        .with_object(LevelObject::new(300.0, 92.0, 24.0, 8.0).with_kind("checkpoint"))
        .with_object(LevelObject::new(600.0, 92.0, 24.0, 8.0).with_kind("checkpoint"))
        .with_object(LevelObject::new(1200.0, 60.0, 24.0, 40.0).with_name("finish"))
}

fn session_with(level: &Level, store: MemoryStore) -> GameSession {
    GameSession::new(
        level,
        MovementConfig::default(),
        GameplayConfig::default(),
        Box::new(store),
    )
}

fn session() -> GameSession {
    session_with(&test_level(), MemoryStore::new())
}

/// Run out the default three second countdown
fn finish_countdown(session: &mut GameSession) {
    for _ in 0..6 {
        session.tick(&FrameInput::default(), 0.5);
    }
    assert_eq!(session.phase(), RunPhase::Running);
}

fn idle(session: &mut GameSession, frames: usize, dt: f32) {
    for _ in 0..frames {
        session.tick(&FrameInput::default(), dt);
    }
}

// ==================== Countdown ====================

#[test]
fn test_countdown_blocks_simulation_then_starts_timer() {
    let level = Level::new("air")
        .with_object(LevelObject::new(0.0, 0.0, 0.0, 0.0).with_name("spawn"))
        .with_object(LevelObject::new(-100.0, 500.0, 400.0, 20.0));
    let mut session = session_with(&level, MemoryStore::new());
    let start = session.player().position;

    assert_eq!(session.phase(), RunPhase::Countdown);
    for _ in 0..5 {
        let report = session.tick(&FrameInput::moving(1).with_jump(true), 0.5);
        assert!(!report.run_started);
        assert!(!session.timer().is_running());
        assert_eq!(session.player().position, start);
        assert_eq!(session.player().velocity, Vec2::ZERO);
    }

    let report = session.tick(&FrameInput::default(), 0.5);
    assert!(report.run_started);
    assert!(session.timer().is_running());
    assert_eq!(session.timer().current_time(), 0.0);
    assert_eq!(session.player().position, start);

    // Gameplay runs from the next frame on
    session.tick(&FrameInput::default(), FRAME);
    assert!(session.player().position.y > start.y);
}

#[test]
fn test_snapshot_reports_countdown() {
    let session = session();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, RunPhase::Countdown);
    assert_eq!(snapshot.countdown, Some(3.0));
    assert_eq!(snapshot.timer_text, "00:00.000");
    assert!(snapshot.best_text.is_none());
    assert_eq!(snapshot.checkpoints.len(), 2);
    assert!(snapshot.finish.is_some());
}

// ==================== Movement ====================

#[test]
fn test_player_rests_on_ground() {
    let mut session = session();
    finish_countdown(&mut session);
    idle(&mut session, 10, FRAME);

    let player = session.player();
    assert!(player.on_ground);
    assert_eq!(player.current_platform, Some(PlatformId(0)));
    assert_eq!(player.rect().bottom(), 100.0);
}

#[test]
fn test_charge_and_release_jump() {
    let mut session = session();
    finish_countdown(&mut session);
    idle(&mut session, 2, FRAME);

    let hold = FrameInput::moving(1).with_jump(true);
    for _ in 0..30 {
        let report = session.tick(&hold, FRAME);
        assert!(report.launch.is_none());
    }
    assert!(session.player().charging);
    let charge = session.snapshot().charge_ratio;
    assert!(charge > 0.0 && charge < 1.0);
    // Charging on normal ground bleeds horizontal speed instead of accelerating
    assert!(session.player().velocity.x.abs() < 1.0);

    let report = session.tick(&FrameInput::moving(1), FRAME);
    let launch = report.launch.expect("releasing the charge launches");
    let movement = MovementConfig::default();
    assert!(launch.speed > movement.v_jump_min && launch.speed < movement.v_jump_max);
    assert!(launch.horizontal > 0.0);

    let player = session.player();
    assert!(!player.on_ground);
    assert!(!player.charging);
    assert!(player.velocity.y < 0.0);
    assert!(player.rect().bottom() < 100.0);
}

#[test]
fn test_jump_lands_back_on_ground() {
    let mut session = session();
    finish_countdown(&mut session);
    idle(&mut session, 2, FRAME);

    for _ in 0..10 {
        session.tick(&FrameInput::default().with_jump(true), FRAME);
    }
    session.tick(&FrameInput::default(), FRAME);
    assert!(!session.player().on_ground);

    let mut landed = false;
    for _ in 0..240 {
        if session.tick(&FrameInput::default(), FRAME).landed {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!(session.player().on_ground);
    assert_eq!(session.player().rect().bottom(), 100.0);
}

#[test]
fn test_frame_time_is_clamped_but_clock_is_not() {
    let mut session = session();
    finish_countdown(&mut session);
    session.teleport_player(Vec2::new(0.0, -400.0));
    let clock = session.clock();

    session.tick(&FrameInput::default(), 1.0);

    assert!((session.clock() - clock - 1.0).abs() < 1e-9);
    let expected = MovementConfig::default().gravity * GameplayConfig::default().max_dt;
    assert!((session.player().velocity.y - expected).abs() < 0.01);
}

#[test]
fn test_negative_max_dt_freezes_physics_without_panicking() {
    let gameplay = GameplayConfig {
        max_dt: -0.01,
        countdown_seconds: 0.0,
        ..GameplayConfig::default()
    };
    let mut session = GameSession::new(
        &test_level(),
        MovementConfig::default(),
        gameplay,
        Box::new(MemoryStore::new()),
    );
    session.teleport_player(Vec2::new(0.0, -400.0));

    idle(&mut session, 2, FRAME);

    assert_eq!(session.phase(), RunPhase::Running);
    assert_eq!(session.player().position, Vec2::new(0.0, -400.0));
    assert_eq!(session.player().velocity, Vec2::ZERO);
}

#[test]
fn test_identical_inputs_are_deterministic() {
    let mut a = session();
    let mut b = session();
    let script: Vec<FrameInput> = (0..200)
        .map(|i| match i % 50 {
            0..=19 => FrameInput::moving(1),
            20..=39 => FrameInput::moving(-1).with_jump(true),
            _ => FrameInput::default(),
        })
        .collect();

    finish_countdown(&mut a);
    finish_countdown(&mut b);
    for input in &script {
        a.tick(input, FRAME);
        b.tick(input, FRAME);
    }

    assert_eq!(a.player().position, b.player().position);
    assert_eq!(a.player().velocity, b.player().velocity);
    assert_eq!(a.snapshot(), b.snapshot());
}

// ==================== Checkpoints ====================

#[test]
fn test_checkpoint_progress_is_monotonic_and_saved() {
    let mut session = session();
    finish_countdown(&mut session);

    session.teleport_player(Vec2::new(600.0, 72.0));
    let report = session.tick(&FrameInput::default(), FRAME);
    assert_eq!(report.checkpoint_reached, Some(1));
    assert_eq!(session.tracker().current(), Some(1));

    let saved = session.store().load_checkpoint().expect("checkpoint saved");
    assert_eq!(saved.level, "test");
    assert_eq!(saved.index, 1);
    assert_eq!(session.player().last_checkpoint, saved.position);

    // Going back to an earlier checkpoint never lowers progress
    session.teleport_player(Vec2::new(300.0, 72.0));
    let report = session.tick(&FrameInput::default(), FRAME);
    assert_eq!(report.checkpoint_reached, None);
    assert_eq!(session.tracker().current(), Some(1));

    let snapshot = session.snapshot();
    assert!(snapshot.checkpoints.iter().all(|c| c.reached));
}

#[test]
fn test_resume_from_saved_checkpoint() {
    let store = MemoryStore {
        best_time: Some(42.0),
        checkpoint: Some(CheckpointSave {
            level: "test".to_string(),
            index: 0,
            position: Vec2::new(300.0, 72.0),
        }),
    };
    let session = session_with(&test_level(), store);

    assert_eq!(session.tracker().current(), Some(0));
    assert_eq!(session.player().position, Vec2::new(300.0, 72.0));
    assert_eq!(session.player().last_checkpoint, Vec2::new(300.0, 72.0));
    assert_eq!(session.timer().best_time(), Some(42.0));
}

#[test]
fn test_checkpoint_for_other_level_is_ignored() {
    let store = MemoryStore {
        best_time: None,
        checkpoint: Some(CheckpointSave {
            level: "elsewhere".to_string(),
            index: 1,
            position: Vec2::new(600.0, 72.0),
        }),
    };
    let session = session_with(&test_level(), store);

    assert_eq!(session.tracker().current(), None);
    assert_eq!(session.player().position, session.spawn());
}

// ==================== Finish & best time ====================

fn run_to_finish(session: &mut GameSession, half_seconds: usize) {
    session.teleport_player(session.spawn());
    session.tick(
        &FrameInput {
            restart_timer: true,
            ..FrameInput::default()
        },
        0.5,
    );
    idle(session, half_seconds, 0.5);
    session.teleport_player(Vec2::new(1200.0, 72.0));
    session.tick(&FrameInput::default(), 0.0);
}

#[test]
fn test_best_time_sequence() {
    let mut session = session();
    finish_countdown(&mut session);

    // 25 half-second frames after the countdown: 12.5 s
    idle(&mut session, 25, 0.5);
    session.teleport_player(Vec2::new(1200.0, 72.0));
    let report = session.tick(&FrameInput::default(), 0.0);
    let run = report.finished.expect("finish completes the run");
    assert!((run.time - 12.5).abs() < 1e-9);
    assert!(run.new_best);
    assert_eq!(session.store().load_best_time(), Some(12.5));
    assert_eq!(session.phase(), RunPhase::Completed);
    assert!(session.finish_display().is_active());

    // Touching the finish again changes nothing
    let report = session.tick(&FrameInput::default(), 0.0);
    assert!(report.finished.is_none());

    run_to_finish(&mut session, 30);
    assert!((session.timer().current_time() - 15.0).abs() < 1e-9);
    assert_eq!(session.store().load_best_time(), Some(12.5));

    run_to_finish(&mut session, 18);
    assert!((session.timer().current_time() - 9.0).abs() < 1e-9);
    assert_eq!(session.store().load_best_time(), Some(9.0));
    assert_eq!(session.snapshot().best_text.as_deref(), Some("00:09.000"));
}

#[test]
fn test_finish_overlay_expires_without_touching_timer() {
    let mut session = session();
    finish_countdown(&mut session);
    idle(&mut session, 4, 0.5);
    session.teleport_player(Vec2::new(1200.0, 72.0));
    session.tick(&FrameInput::default(), 0.0);
    session.teleport_player(session.spawn());
    let time = session.timer().current_time();

    idle(&mut session, 7, 0.5);

    assert!(!session.finish_display().is_active());
    assert!(session.timer().is_completed());
    assert_eq!(session.timer().current_time(), time);
}

// ==================== Restarts ====================

#[test]
fn test_restart_from_spawn_clears_progress_and_counts_down() {
    let mut session = session();
    finish_countdown(&mut session);
    session.teleport_player(Vec2::new(300.0, 72.0));
    session.tick(&FrameInput::default(), FRAME);
    assert_eq!(session.tracker().current(), Some(0));

    let report = session.tick(
        &FrameInput {
            restart_from_spawn: true,
            ..FrameInput::default()
        },
        FRAME,
    );

    assert!(report.restarted);
    assert_eq!(session.phase(), RunPhase::Countdown);
    assert_eq!(session.tracker().current(), None);
    assert_eq!(session.player().position, session.spawn());
    assert_eq!(session.player().last_checkpoint, session.spawn());
    assert!(session.store().load_checkpoint().is_none());
    assert!(!session.timer().is_running());
}

#[test]
fn test_restart_timer_skips_countdown() {
    let mut session = session();
    finish_countdown(&mut session);
    idle(&mut session, 4, 0.5);
    let position = session.player().position;

    let report = session.tick(
        &FrameInput {
            restart_timer: true,
            ..FrameInput::default()
        },
        FRAME,
    );

    assert!(report.timer_restarted);
    assert_eq!(session.phase(), RunPhase::Running);
    assert_eq!(session.timer().current_time(), 0.0);
    assert!((session.player().position.x - position.x).abs() < 0.001);
}

#[test]
fn test_restart_timer_during_countdown_starts_run() {
    let mut session = session();
    assert_eq!(session.phase(), RunPhase::Countdown);

    let report = session.tick(
        &FrameInput {
            restart_timer: true,
            ..FrameInput::default()
        },
        FRAME,
    );

    assert!(report.timer_restarted);
    assert_eq!(session.phase(), RunPhase::Running);
    assert!(session.timer().is_running());
    assert_eq!(session.timer().current_time(), 0.0);
}

#[test]
fn test_restart_from_spawn_during_countdown() {
    let mut session = session();
    session.tick(&FrameInput::default(), 0.5);

    let report = session.tick(
        &FrameInput {
            restart_from_spawn: true,
            ..FrameInput::default()
        },
        FRAME,
    );

    assert!(report.restarted);
    assert_eq!(session.phase(), RunPhase::Countdown);
    assert_eq!(session.player().position, session.spawn());
}

// ==================== Kill plane ====================

#[test]
fn test_falling_out_respawns_at_last_checkpoint() {
    let mut session = session();
    finish_countdown(&mut session);
    session.teleport_player(Vec2::new(300.0, 72.0));
    session.tick(&FrameInput::default(), FRAME);
    let checkpoint = session.player().last_checkpoint;

    session.teleport_player(Vec2::new(3000.0, session.kill_plane_y() + 10.0));
    let report = session.tick(&FrameInput::default(), FRAME);

    assert!(report.respawned);
    assert_eq!(session.player().position, checkpoint);
    assert_eq!(session.player().velocity, Vec2::ZERO);
    assert!(session.timer().is_running());
}

// ==================== Moving platforms ====================

fn lift_level() -> Level {
    Level::new("lift")
        .with_object(LevelObject::new(40.0, 72.0, 0.0, 0.0).with_name("spawn"))
        .with_object(
            LevelObject::new(0.0, 100.0, 100.0, 12.0)
                .with_property("moving", true)
                .with_property("speed", 60.0)
                .with_path(vec![[0.0, 100.0], [400.0, 100.0]]),
        )
}

#[test]
fn test_moving_platform_carries_grounded_player() {
    let mut session = session_with(&lift_level(), MemoryStore::new());
    finish_countdown(&mut session);
    idle(&mut session, 60, FRAME);

    let platform = &session.platforms()[0];
    assert!((platform.rect.x - 60.0).abs() < 0.01);
    assert!(session.player().on_ground);
    assert!(session.player().position.x > 95.0);
    assert_eq!(session.player().rect().bottom(), platform.rect.top());
}

#[test]
fn test_moving_platform_without_carry() {
    let gameplay = GameplayConfig {
        carry_on_moving_platforms: false,
        ..GameplayConfig::default()
    };
    let mut session = GameSession::new(
        &lift_level(),
        MovementConfig::default(),
        gameplay,
        Box::new(MemoryStore::new()),
    );
    finish_countdown(&mut session);
    idle(&mut session, 30, FRAME);

    assert!(session.player().on_ground);
    assert!((session.platforms()[0].rect.x - 30.0).abs() < 0.01);
    assert!((session.player().position.x - 40.0).abs() < 0.001);
}

// ==================== Enemies ====================

#[test]
fn test_enemy_pushes_player_up_and_away() {
    let level = Level::new("enemy")
        .with_object(LevelObject::new(-300.0, -300.0, 0.0, 0.0).with_name("spawn"))
        .with_object(
            LevelObject::new(200.0, 100.0, 100.0, 20.0)
                .with_property("enemy", true)
                .with_property("radius", 10i64),
        );
    let mut session = session_with(&level, MemoryStore::new());
    finish_countdown(&mut session);
    assert_eq!(session.enemies().len(), 1);

    session.teleport_player(Vec2::new(178.0, 80.0));
    let report = session.tick(&FrameInput::default(), FRAME);

    assert!(report.pushed);
    let gameplay = GameplayConfig::default();
    let player = session.player();
    assert!(player.velocity.x < 0.0);
    assert!(player.velocity.y <= -gameplay.min_upward_push);
    assert!(!player.on_ground);

    // Invincibility window suppresses an immediate second push
    session.teleport_player(Vec2::new(178.0, 80.0));
    let report = session.tick(&FrameInput::default(), FRAME);
    assert!(!report.pushed);
}
