//! Navigation and the landing/collision state machine.
//!
//! ## Pipeline (runs in order every `Update` tick)
//!
//! 1. [`intent_clear_system`] — resets [`ShipIntent`] to its default.
//! 2. [`keyboard_to_intent_system`] — translates WASD / arrow keys into
//!    `ShipIntent` (only when an input plugin is present).
//! 3. [`ship_navigation_system`] — converts `ShipIntent` into motion, runs
//!    the collision/landing state machine against the tick's
//!    [`PlanetSnapshot`], and applies the world-bounds clamp.
//!
//! The **input abstraction layer** (`ShipIntent`) makes navigation fully
//! testable: tests populate the resource directly and run only
//! `ship_navigation_system`.
//!
//! ## Landing rules
//!
//! - Flying → Landed: the tick's *candidate* position (current position plus
//!   the intent delta) is tested against every body; the first body whose
//!   collision circle (`radius + ship_size/2`) contains the candidate wins.
//!   The candidate is snapped onto that circle and the polar offset angle is
//!   recorded **from the unsnapped candidate** — computed exactly once, on
//!   this transition.
//! - Landed: the ship is clamped to `body.pos + (radius + size/2) ×
//!   (cos θ, sin θ)` every tick, so it rides along with the body's orbit.
//! - Landed → Flying: takeoff is always permitted and performs no distance
//!   check; the ship stays at its on-body position, so the very next tick
//!   re-collides with the same body unless the player moves away.  That is
//!   intentional, not a bug.
//! - The world-bounds clamp runs last, in both states.
//!
//! Collision is a normal, frequent transition here — never an error.

use super::state::{FlightStatus, Ship, ShipFuel, ShipIntent, ShipStats};
use crate::config::GameConfig;
use crate::orbit::{PlanetSnapshot, PlanetState};
use bevy::prelude::*;

// ── Step 1: Clear ─────────────────────────────────────────────────────────────

/// Clear [`ShipIntent`] at the start of every tick.
///
/// Must run before any system that writes intent fields.
pub fn intent_clear_system(mut intent: ResMut<ShipIntent>) {
    *intent = ShipIntent::default();
}

// ── Step 2: Keyboard → Intent ─────────────────────────────────────────────────

/// Translate WASD / arrow keys (+ Space for takeoff) into [`ShipIntent`].
///
/// Registered with `run_if(resource_exists::<ButtonInput<KeyCode>>)` so the
/// headless core runs without an input plugin; a windowed collaborator gets
/// keyboard control for free.
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<ShipIntent>,
) {
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        intent.thrust = true;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        intent.reverse = true;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        intent.turn_left = true;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        intent.turn_right = true;
    }
    if keys.just_pressed(KeyCode::Space) {
        intent.takeoff = true;
    }
}

// ── Collision helpers ─────────────────────────────────────────────────────────

/// Contact tolerance: a ship resting exactly on the collision circle (the
/// landed snap puts it there) still counts as touching.
const CONTACT_EPS: f32 = 1e-3;

/// First body (in snapshot order) whose collision circle contains `candidate`,
/// together with the landing offset angle derived from the **unsnapped**
/// candidate.
///
/// Multiple simultaneous hits would require overlapping bodies, which the
/// catalog's orbit spacing rules out; first-in-order wins regardless.
fn detect_collision<'a>(
    candidate: Vec2,
    ship_size: f32,
    snapshot: &'a PlanetSnapshot,
) -> Option<(&'a PlanetState, f32)> {
    for body in &snapshot.planets {
        if candidate.distance(body.pos) < body.radius + ship_size / 2.0 + CONTACT_EPS {
            let delta = candidate - body.pos;
            return Some((body, delta.y.atan2(delta.x)));
        }
    }
    None
}

/// Anchor point for a ship of `ship_size` landed on `body` at `offset_angle`.
#[inline]
fn landed_anchor(body: &PlanetState, ship_size: f32, offset_angle: f32) -> Vec2 {
    body.pos + (body.radius + ship_size / 2.0) * Vec2::from_angle(offset_angle)
}

/// Clamp a position into `[0, world − size]` on both axes.  Always applied
/// last, independently of collision state.
fn clamp_to_world(pos: Vec2, ship_size: f32, config: &GameConfig) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, config.world_width - ship_size),
        pos.y.clamp(0.0, config.world_height - ship_size),
    )
}

// ── Step 3: Navigation ────────────────────────────────────────────────────────

/// Integrate the ship's position from [`ShipIntent`] and arbitrate the
/// flying/landed state machine.  The only system that moves the ship.
pub fn ship_navigation_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    snapshot: Res<PlanetSnapshot>,
    intent: Res<ShipIntent>,
    stats: Res<ShipStats>,
    mut status: ResMut<FlightStatus>,
    mut q_ship: Query<(&mut Transform, &mut ShipFuel), With<Ship>>,
) {
    let Ok((mut transform, mut fuel)) = q_ship.single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    // Heading updates continuously regardless of landing state, and costs no fuel.
    let turn = (intent.turn_left as i32 - intent.turn_right as i32) as f32;
    if turn != 0.0 {
        transform.rotate_z(turn * config.rotation_speed * dt);
    }

    let mut pos = transform.translation.truncate();

    match status.clone() {
        FlightStatus::Landed {
            planet,
            offset_angle,
        } => {
            if intent.takeoff {
                // Always permitted; the ship resumes free flight from its
                // on-body position and may re-collide next tick.
                *status = FlightStatus::Flying;
            } else if let Some(body) = snapshot.body_by_name(&planet) {
                pos = landed_anchor(body, stats.size, offset_angle);
            }
        }
        FlightStatus::Flying => {
            let forward = (transform.rotation * Vec3::Y).truncate();
            let mut delta = Vec2::ZERO;
            if fuel.fuel > 0.0 && (intent.thrust || intent.reverse) {
                if intent.thrust {
                    delta += forward * stats.speed * config.speed_scale * dt;
                }
                if intent.reverse {
                    delta -= forward * stats.speed * config.speed_scale * config.reverse_factor * dt;
                }
                fuel.fuel = (fuel.fuel - config.fuel_burn_rate * fuel.efficiency * dt).max(0.0);
            }

            let candidate = pos + delta;
            match detect_collision(candidate, stats.size, &snapshot) {
                Some((body, offset_angle)) => {
                    pos = landed_anchor(body, stats.size, offset_angle);
                    *status = FlightStatus::Landed {
                        planet: body.name.clone(),
                        offset_angle,
                    };
                }
                None => pos = candidate,
            }
        }
    }

    let clamped = clamp_to_world(pos, stats.size, &config);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

// ── Unit tests ────────────────────────────────────────────────────────────────
