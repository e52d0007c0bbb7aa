//! Player physics for charge-and-release platforming
//!
//! Provides the per-frame kinematic integrator: ground control, friction,
//! ice behavior, jump charging, the release impulse, and gravity.

use crate::body::PlatformId;
use crate::surface::SurfaceFlags;
use chargejump_math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Charge time allowed beyond `t_max` before clamping
pub const CHARGE_OVERFLOW: f32 = 0.1;

/// Per-tick multiplicative decay applied to horizontal speed on ice
pub const ICE_DECAY_PER_TICK: f32 = 0.98;

/// Tick rate the ice decay factor is expressed in
pub const ICE_REFERENCE_HZ: f32 = 60.0;

/// Movement tuning shared by the integrator and the collision response
///
/// Units are pixels and seconds, with +y pointing down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Horizontal speed cap reached by ground control (px/s)
    pub max_ground_speed: f32,
    /// Linear acceleration toward the target ground speed (px/s²)
    pub ground_accel: f32,
    /// Multiplier on `ground_accel` while on ice
    pub ice_accel_factor: f32,
    /// Time constant of ground friction (s)
    pub friction_time: f32,
    /// Divides the charging damping time on ice
    pub ice_friction_multiplier: f32,
    /// Scales how many reference ticks of ice decay apply per second
    pub ice_decay_scale: f32,
    /// Charge time that yields the weakest jump (s)
    pub t_min: f32,
    /// Charge time that yields the strongest jump (s)
    pub t_max: f32,
    /// Launch speed at minimum charge (px/s)
    pub v_jump_min: f32,
    /// Launch speed at full charge (px/s)
    pub v_jump_max: f32,
    /// Fraction of launch speed converted into horizontal speed
    pub horizontal_ratio: f32,
    /// Minimum airborne horizontal speed for a wall bounce (px/s)
    pub bounce_min_speed: f32,
    /// Fall speed above which landing bleeds horizontal speed (px/s)
    pub landing_slide_min_fall: f32,
    /// Fraction of horizontal speed lost per px/s of fall speed
    pub landing_slide_factor: f32,
    /// Upper bound on the landing slide reduction
    pub landing_slide_max_reduction: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 1400.0,
            max_ground_speed: 180.0,
            ground_accel: 1400.0,
            ice_accel_factor: 0.25,
            friction_time: 0.08,
            ice_friction_multiplier: 4.0,
            ice_decay_scale: 1.0,
            t_min: 0.08,
            t_max: 0.9,
            v_jump_min: 300.0,
            v_jump_max: 760.0,
            horizontal_ratio: 0.45,
            bounce_min_speed: 40.0,
            landing_slide_min_fall: 500.0,
            landing_slide_factor: 0.0005,
            landing_slide_max_reduction: 0.6,
            player_width: 20.0,
            player_height: 28.0,
        }
    }
}

impl MovementConfig {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }
}

/// Normalized charge in [0, 1] for a hold duration
///
/// The duration is clamped into `[t_min, t_max]` first, so the result is 0
/// at or below `t_min` and 1 at or above `t_max`.
pub fn charge_ratio(t_charge: f32, config: &MovementConfig) -> f32 {
    let span = config.t_max - config.t_min;
    if span <= 0.0 {
        return 1.0;
    }
    let t = t_charge.clamp(config.t_min, config.t_max);
    ((t - config.t_min) / span).clamp(0.0, 1.0)
}

/// `1 - (1 - x)^3`
#[inline]
pub fn ease_out_cubic(x: f32) -> f32 {
    let inv = 1.0 - x;
    1.0 - inv * inv * inv
}

/// Launch speed for a hold duration
pub fn jump_speed_for_charge(t_charge: f32, config: &MovementConfig) -> f32 {
    let power = ease_out_cubic(charge_ratio(t_charge, config));
    config.v_jump_min * (1.0 - power) + config.v_jump_max * power
}

/// Impulse applied by a jump release
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpLaunch {
    /// Upward launch speed (positive number)
    pub speed: f32,
    /// Horizontal launch component
    pub horizontal: f32,
}

/// Player kinematic state
#[derive(Clone, Debug)]
pub struct PlayerPhysics {
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// Whether the player had a supporting contact from below last frame
    pub on_ground: bool,
    pub charging: bool,
    /// Accumulated jump hold duration (s)
    pub t_charge: f32,
    /// Platform currently supporting the player (non-owning)
    pub current_platform: Option<PlatformId>,
    /// Surface of the supporting platform
    pub ground_surface: SurfaceFlags,
    /// Respawn position
    pub last_checkpoint: Vec2,
}

impl PlayerPhysics {
    /// Create a player at rest at `position`, which is also its respawn point
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            on_ground: false,
            charging: false,
            t_charge: 0.0,
            current_platform: None,
            ground_surface: SurfaceFlags::empty(),
            last_checkpoint: position,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Grounded on an icy surface
    pub fn on_ice(&self) -> bool {
        self.on_ground && self.ground_surface.is_ice()
    }

    /// Charge ratio for display; zero when not charging
    pub fn display_charge(&self, config: &MovementConfig) -> f32 {
        if self.charging {
            charge_ratio(self.t_charge, config)
        } else {
            0.0
        }
    }

    /// Place the player at `position` at rest, clearing jump and ground state
    pub fn respawn(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.on_ground = false;
        self.charging = false;
        self.t_charge = 0.0;
        self.current_platform = None;
        self.ground_surface = SurfaceFlags::empty();
    }

    /// Ground control for one frame
    ///
    /// Airborne players get no direct control.
    pub fn apply_horizontal_control(&mut self, input: f32, config: &MovementConfig, dt: f32) {
        if !self.on_ground {
            return;
        }

        if self.charging {
            let mut tau = config.friction_time * 0.5;
            if self.on_ice() && config.ice_friction_multiplier > 0.0 {
                tau /= config.ice_friction_multiplier;
            }
            if tau > 0.0 {
                self.velocity.x *= (-dt / tau).exp();
            } else {
                self.velocity.x = 0.0;
            }
            return;
        }

        if input == 0.0 {
            return;
        }

        let target = input * config.max_ground_speed;
        let accel = if self.on_ice() {
            config.ground_accel * config.ice_accel_factor
        } else {
            config.ground_accel
        };
        let step = accel * dt;
        if self.velocity.x < target {
            self.velocity.x = (self.velocity.x + step).min(target);
        } else if self.velocity.x > target {
            self.velocity.x = (self.velocity.x - step).max(target);
        }
    }

    /// Friction pass
    ///
    /// Ice always applies a fixed per-tick decay and never stops the player.
    pub fn apply_friction(&mut self, input: f32, config: &MovementConfig, dt: f32) {
        if !self.on_ground {
            return;
        }

        if self.on_ice() {
            let ticks = dt * ICE_REFERENCE_HZ * config.ice_decay_scale;
            self.velocity.x *= ICE_DECAY_PER_TICK.powf(ticks);
        } else if input == 0.0 {
            if config.friction_time > 0.0 {
                self.velocity.x *= (-dt / config.friction_time).exp();
            } else {
                self.velocity.x = 0.0;
            }
        }
    }

    /// Accumulate charge while grounded and held
    pub fn update_charge(&mut self, jump_held: bool, config: &MovementConfig, dt: f32) {
        if self.on_ground && jump_held {
            self.charging = true;
            self.t_charge = (self.t_charge + dt).min(config.t_max + CHARGE_OVERFLOW);
        }
    }

    /// Launch if a charge was released this frame
    pub fn release_jump(
        &mut self,
        jump_held: bool,
        input: f32,
        config: &MovementConfig,
    ) -> Option<JumpLaunch> {
        if !self.charging || jump_held {
            return None;
        }

        let speed = jump_speed_for_charge(self.t_charge, config);
        let horizontal = speed * config.horizontal_ratio * direction(input);

        if self.on_ice() {
            self.velocity.x += horizontal;
        } else {
            self.velocity.x = horizontal;
        }
        self.velocity.y = -speed;

        self.charging = false;
        self.t_charge = 0.0;
        self.on_ground = false;
        self.current_platform = None;

        log::trace!("jump released: speed {speed:.1}, horizontal {horizontal:.1}");
        Some(JumpLaunch { speed, horizontal })
    }

    /// Unconditional gravity
    pub fn apply_gravity(&mut self, config: &MovementConfig, dt: f32) {
        self.velocity.y += config.gravity * dt;
    }

    /// Full integrator step: control, friction, charge, release, gravity
    ///
    /// Updates velocity only. The position is resolved by the collision
    /// world using the returned goal position.
    pub fn integrate(
        &mut self,
        input: f32,
        jump_held: bool,
        config: &MovementConfig,
        dt: f32,
    ) -> Option<JumpLaunch> {
        self.apply_horizontal_control(input, config, dt);
        self.apply_friction(input, config, dt);
        self.update_charge(jump_held, config, dt);
        let launch = self.release_jump(jump_held, input, config);
        self.apply_gravity(config, dt);
        launch
    }

    /// Where the player wants to be after `dt` at the current velocity
    pub fn goal_position(&self, dt: f32) -> Vec2 {
        self.position + self.velocity * dt
    }
}

/// -1, 0 or 1 for a horizontal input axis value
#[inline]
fn direction(input: f32) -> f32 {
    if input > 0.0 {
        1.0
    } else if input < 0.0 {
        -1.0
    } else {
        0.0
    }
}
