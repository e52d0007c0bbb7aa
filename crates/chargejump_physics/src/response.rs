//! Contact response for the player
//!
//! Interprets the contacts of one move: grounding, ceiling stops, wall
//! bounces and landing slide. Trigger contacts are handed back to the caller.

use crate::body::ColliderTag;
use crate::collision::{CollisionResponse, Contact};
use crate::player::{MovementConfig, PlayerPhysics};
use crate::surface::SurfaceFlags;

/// Fraction of horizontal speed kept (and reversed) by a wall bounce
pub const WALL_BOUNCE_RESTITUTION: f32 = 0.6;

/// Vertical speed kept when bouncing off a wall while falling
pub const WALL_BOUNCE_FALL_DAMPING: f32 = 0.9;

/// What the response pass observed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseOutcome {
    /// Touched ground this frame after being airborne
    pub landed: bool,
    /// Bounced off a wall this frame
    pub bounced: bool,
    /// Passthrough contacts in contact order
    pub triggers: Vec<ColliderTag>,
}

/// Apply a move's contacts to the player in the order given
pub fn resolve_contacts(
    player: &mut PlayerPhysics,
    contacts: &[Contact],
    config: &MovementConfig,
) -> ResponseOutcome {
    let mut outcome = ResponseOutcome::default();
    let was_grounded = player.on_ground;

    player.on_ground = false;
    player.current_platform = None;
    player.ground_surface = SurfaceFlags::empty();

    for contact in contacts {
        if contact.response == CollisionResponse::Passthrough {
            outcome.triggers.push(contact.tag);
            continue;
        }
        if contact.response != CollisionResponse::Solid {
            continue;
        }

        if contact.is_ceiling() && player.velocity.y < 0.0 {
            player.velocity.y = 0.0;
        }

        if contact.is_wall()
            && !player.on_ground
            && player.velocity.x.abs() > config.bounce_min_speed
        {
            player.velocity.x = -player.velocity.x * WALL_BOUNCE_RESTITUTION;
            if player.velocity.y > 0.0 {
                player.velocity.y *= WALL_BOUNCE_FALL_DAMPING;
            }
            outcome.bounced = true;
        }

        if contact.is_ground() {
            let fall_speed = player.velocity.y;
            player.on_ground = true;
            player.current_platform = contact.tag.platform_id();
            player.ground_surface = contact.surface;
            player.velocity.y = 0.0;

            if fall_speed > 0.0 && !was_grounded {
                outcome.landed = true;
            }
            if !contact.surface.is_ice() && fall_speed > config.landing_slide_min_fall {
                let reduction =
                    (fall_speed * config.landing_slide_factor).min(config.landing_slide_max_reduction);
                player.velocity.x *= 1.0 - reduction;
            }
        }
    }

    outcome
}
