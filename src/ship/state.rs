//! Ship components and resources.
//!
//! All ECS components and Bevy resources that describe the ship live here.
//! Systems that mutate this state are in [`super::control`].

use crate::config::GameConfig;
use crate::constants::{FUEL_CAPACITY, SHIP_MAX_HP, SHIP_SIZE, SHIP_SPEED};
use crate::orbit::planet_catalog;
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker component for the ship entity.
#[derive(Component)]
pub struct Ship;

/// Hull integrity.  Nothing in the core damages the ship; quest rewards and
/// the Max Health upgrade raise `max_hp` (and, for rewards, `hp` with it).
#[derive(Component, Debug, Clone)]
pub struct ShipHealth {
    pub hp: f32,
    pub max_hp: f32,
}

impl Default for ShipHealth {
    fn default() -> Self {
        Self {
            hp: SHIP_MAX_HP,
            max_hp: SHIP_MAX_HP,
        }
    }
}

/// Fuel state.  Thrust burns `fuel_burn_rate × efficiency` per second; an
/// empty tank grounds the engines (turning and takeoff stay free).
#[derive(Component, Debug, Clone)]
pub struct ShipFuel {
    pub fuel: f32,
    pub capacity: f32,
    /// Burn multiplier; Fuel Efficiency upgrades and rewards shrink it below 1.0.
    pub efficiency: f32,
}

impl Default for ShipFuel {
    fn default() -> Self {
        Self {
            fuel: FUEL_CAPACITY,
            capacity: FUEL_CAPACITY,
            efficiency: 1.0,
        }
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Mutable ship statistics advanced by quest rewards and tech upgrades.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ShipStats {
    /// Speed stat; effective velocity is `speed × config.speed_scale` u/s.
    pub speed: f32,
    /// Diameter-equivalent size; half of it extends every collision circle.
    pub size: f32,
}

impl Default for ShipStats {
    fn default() -> Self {
        Self {
            speed: SHIP_SPEED,
            size: SHIP_SIZE,
        }
    }
}

/// The landing state machine: either free flight or anchored to a body.
///
/// `offset_angle` is the polar angle from the body's centre to the ship,
/// fixed at the moment of landing and held constant until takeoff so the
/// ship rides along with the body's orbit.  It is **never** recomputed from
/// the live ship position — that position is already clamped onto the body,
/// so re-deriving the angle from it would freeze the anchor forever.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub enum FlightStatus {
    #[default]
    Flying,
    Landed {
        planet: String,
        offset_angle: f32,
    },
}

impl FlightStatus {
    #[inline]
    pub fn is_landed(&self) -> bool {
        matches!(self, FlightStatus::Landed { .. })
    }

    /// Name of the body the ship is landed on, if any.
    pub fn landed_on(&self) -> Option<&str> {
        match self {
            FlightStatus::Flying => None,
            FlightStatus::Landed { planet, .. } => Some(planet),
        }
    }
}

// ── Input Abstraction ─────────────────────────────────────────────────────────

/// Aggregated navigation intent for the current tick, derived from whatever
/// input source is active.
///
/// Input systems (keyboard, autopilot, tests) write to this resource each
/// frame after it is cleared.  [`super::control::ship_navigation_system`]
/// reads it and is the only system that moves the ship, so tests can populate
/// this directly to drive the ship without a real input device.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipIntent {
    /// Rotate the heading counter-clockwise this tick.
    pub turn_left: bool,
    /// Rotate the heading clockwise this tick.
    pub turn_right: bool,
    /// Accelerate along the heading.
    pub thrust: bool,
    /// Decelerate / move backwards at reduced magnitude.
    pub reverse: bool,
    /// Leave the current body.  A no-op while flying.
    pub takeoff: bool,
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Derived start position: on Earth's orbit, slightly behind Earth's start
/// angle — within sight of the first quest targets but outside every landing
/// threshold.
pub fn ship_start_position(config: &GameConfig) -> Vec2 {
    let catalog = planet_catalog();
    let earth = catalog
        .iter()
        .find(|spec| spec.name == "Earth")
        .unwrap_or(&catalog[0]);
    let angle = earth.start_angle - config.start_angle_offset;
    config.sun_pos() + earth.orbit_radius * Vec2::from_angle(angle)
}

/// Spawn the ship entity at the derived start position.
pub fn spawn_ship(mut commands: Commands, config: Res<GameConfig>) {
    let pos = ship_start_position(&config);
    commands.spawn((
        Ship,
        ShipHealth {
            hp: config.ship_max_hp,
            max_hp: config.ship_max_hp,
        },
        ShipFuel {
            fuel: config.fuel_capacity,
            capacity: config.fuel_capacity,
            efficiency: 1.0,
        },
        Transform::from_translation(pos.extend(0.1)),
    ));
    info!("Ship spawned on Earth's orbit at {pos:?}");
}
