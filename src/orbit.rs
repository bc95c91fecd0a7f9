//! Orbital model: deterministic circular-orbit kinematics for every body.
//!
//! ## Flow (per tick)
//!
//! 1. [`advance_orbits_system`] integrates each body's angular position and
//!    wraps it into `[0, 2π)`.
//! 2. [`planet_snapshot_system`] derives Cartesian positions and publishes an
//!    ordered [`PlanetSnapshot`].
//!
//! Everything downstream (navigation, quest gating) reads only the snapshot,
//! never the live [`CelestialBody`] components, so every system in a tick
//! sees one consistent set of positions.
//!
//! The central star does not orbit: it is a fixed point at the world centre
//! ([`crate::config::GameConfig::sun_pos`]) that anchors every orbital radius.

use crate::config::GameConfig;
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Static descriptor for one body in the fixed world catalog.
#[derive(Debug, Clone, Copy)]
pub struct PlanetSpec {
    pub name: &'static str,
    pub orbit_radius: f32,
    pub color: (u8, u8, u8),
    pub material: &'static str,
    pub radius: f32,
    pub speed: f32,
    pub start_angle: f32,
}

/// The full body catalog: nine Sol planets, three Alpha Centauri worlds, and
/// three Trappist-1 worlds, ordered innermost-first.
///
/// Orbit spacing (≥ 400 u between adjacent orbits, radii ≤ 150 u) guarantees
/// that no two bodies can ever overlap, which is what lets the collision
/// arbiter take the first hit in iteration order without a tie-break rule.
pub fn planet_catalog() -> Vec<PlanetSpec> {
    let sol = PI / 4.5;
    vec![
        // ── Sol ──────────────────────────────────────────────────────────────
        PlanetSpec { name: "Mercury", orbit_radius: 600.0, color: (200, 200, 200), material: "Iron", radius: 40.0, speed: 1.6, start_angle: 0.0 },
        PlanetSpec { name: "Venus", orbit_radius: 1200.0, color: (255, 200, 0), material: "Sulfur", radius: 60.0, speed: 1.2, start_angle: sol },
        PlanetSpec { name: "Earth", orbit_radius: 1800.0, color: (0, 100, 255), material: "Water", radius: 70.0, speed: 1.0, start_angle: 2.0 * sol },
        PlanetSpec { name: "Mars", orbit_radius: 2400.0, color: (255, 80, 0), material: "Silicon", radius: 55.0, speed: 0.8, start_angle: 3.0 * sol },
        PlanetSpec { name: "Jupiter", orbit_radius: 3000.0, color: (210, 180, 140), material: "Hydrogen", radius: 120.0, speed: 0.5, start_angle: 4.0 * sol },
        PlanetSpec { name: "Saturn", orbit_radius: 3600.0, color: (230, 220, 170), material: "Helium", radius: 110.0, speed: 0.4, start_angle: 5.0 * sol },
        PlanetSpec { name: "Uranus", orbit_radius: 4200.0, color: (100, 255, 255), material: "Methane", radius: 90.0, speed: 0.3, start_angle: 6.0 * sol },
        PlanetSpec { name: "Neptune", orbit_radius: 4800.0, color: (60, 80, 255), material: "Ammonia", radius: 85.0, speed: 0.25, start_angle: 7.0 * sol },
        PlanetSpec { name: "Pluto", orbit_radius: 5200.0, color: (200, 200, 255), material: "Ice", radius: 30.0, speed: 0.18, start_angle: 8.0 * sol },
        // ── Alpha Centauri ───────────────────────────────────────────────────
        PlanetSpec { name: "Centauri Prime", orbit_radius: 7000.0, color: (180, 255, 255), material: "Xenon", radius: 60.0, speed: 0.13, start_angle: 0.5 },
        PlanetSpec { name: "Centauri Secundus", orbit_radius: 7600.0, color: (255, 120, 255), material: "Crystal", radius: 55.0, speed: 0.11, start_angle: 1.2 },
        PlanetSpec { name: "Centauri Tertius", orbit_radius: 8200.0, color: (255, 255, 120), material: "Helium-3", radius: 100.0, speed: 0.09, start_angle: 2.1 },
        // ── Trappist-1 ───────────────────────────────────────────────────────
        PlanetSpec { name: "Trappist-1e", orbit_radius: 9000.0, color: (120, 255, 120), material: "Organics", radius: 50.0, speed: 0.07, start_angle: 2.8 },
        PlanetSpec { name: "Trappist-1g", orbit_radius: 9600.0, color: (120, 180, 255), material: "Ice", radius: 45.0, speed: 0.06, start_angle: 3.5 },
        PlanetSpec { name: "Trappist-1h", orbit_radius: 10_200.0, color: (255, 200, 120), material: "Rare Metals", radius: 40.0, speed: 0.05, start_angle: 4.2 },
    ]
}

// ── Components ────────────────────────────────────────────────────────────────

/// A planet on a fixed circular orbit around the central star.
///
/// `angle` is the only mutable field and is always kept in `[0, 2π)`.
#[derive(Component, Debug, Clone)]
pub struct CelestialBody {
    pub name: String,
    /// Distance from the star (fixed).
    pub orbit_radius: f32,
    /// Angular position in radians; invariant: `0.0 ≤ angle < TAU`.
    pub angle: f32,
    /// Angular speed (signed; negative orbits clockwise).
    pub speed: f32,
    /// Visual radius, also the collision radius.
    pub radius: f32,
    /// The single resource type harvestable at this body.
    pub material: String,
    pub color: Color,
    /// Stable catalog position, used to keep snapshot ordering deterministic.
    pub index: usize,
}

impl CelestialBody {
    /// Advance the angular position by `speed × dt × time_scale`, wrapped
    /// unconditionally into `[0, 2π)`.
    pub fn advance(&mut self, dt: f32, time_scale: f32) {
        self.angle = (self.angle + self.speed * dt * time_scale).rem_euclid(TAU);
    }

    /// Cartesian position on the orbit circle around `sun`.  Pure.
    pub fn position(&self, sun: Vec2) -> Vec2 {
        sun + self.orbit_radius * Vec2::from_angle(self.angle)
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Per-tick derived state for one body: everything downstream consumers need.
#[derive(Debug, Clone)]
pub struct PlanetState {
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub material: String,
}

/// Ordered list of planet states for the current tick.
///
/// Rebuilt from scratch every tick after the orbit advance; ordering follows
/// the catalog so the collision arbiter's "first hit wins" rule is stable.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlanetSnapshot {
    pub planets: Vec<PlanetState>,
}

impl PlanetSnapshot {
    pub fn body_by_name(&self, name: &str) -> Option<&PlanetState> {
        self.planets.iter().find(|p| p.name == name)
    }
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

impl CelestialBody {
    /// Build a body from its catalog entry.
    pub fn from_spec(index: usize, spec: &PlanetSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            orbit_radius: spec.orbit_radius,
            angle: spec.start_angle.rem_euclid(TAU),
            speed: spec.speed,
            radius: spec.radius,
            material: spec.material.to_string(),
            color: Color::srgb_u8(spec.color.0, spec.color.1, spec.color.2),
            index,
        }
    }
}

/// Spawn one entity per catalog body at its start angle.
pub fn spawn_celestial_bodies(commands: &mut Commands, config: &GameConfig) {
    let sun = config.sun_pos();
    for (index, spec) in planet_catalog().into_iter().enumerate() {
        let body = CelestialBody::from_spec(index, &spec);
        let pos = body.position(sun);
        commands.spawn((body, Transform::from_translation(pos.extend(0.0))));
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Advance every body's angular position and move its transform onto the new
/// orbit point.
pub fn advance_orbits_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut q_bodies: Query<(&mut CelestialBody, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let sun = config.sun_pos();
    for (mut body, mut transform) in q_bodies.iter_mut() {
        body.advance(dt, config.orbit_time_scale);
        let pos = body.position(sun);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    }
}

/// Publish the ordered [`PlanetSnapshot`] for this tick.
///
/// Runs immediately after [`advance_orbits_system`]; navigation and quest
/// gating read only this resource.
pub fn planet_snapshot_system(
    config: Res<GameConfig>,
    q_bodies: Query<&CelestialBody>,
    mut snapshot: ResMut<PlanetSnapshot>,
) {
    let sun = config.sun_pos();
    let mut bodies: Vec<&CelestialBody> = q_bodies.iter().collect();
    bodies.sort_by_key(|b| b.index);
    snapshot.planets.clear();
    for body in bodies {
        snapshot.planets.push(PlanetState {
            name: body.name.clone(),
            pos: body.position(sun),
            radius: body.radius,
            color: body.color,
            material: body.material.clone(),
        });
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ORBIT_TIME_SCALE;

    fn test_body(speed: f32, start_angle: f32) -> CelestialBody {
        CelestialBody {
            name: "Testia".to_string(),
            orbit_radius: 1000.0,
            angle: start_angle,
            speed,
            radius: 50.0,
            material: "Iron".to_string(),
            color: Color::WHITE,
            index: 0,
        }
    }

    #[test]
    fn angle_stays_normalized_over_many_steps() {
        let mut body = test_body(1.6, 0.0);
        for _ in 0..10_000 {
            body.advance(1.0 / 60.0, ORBIT_TIME_SCALE);
            assert!(
                (0.0..TAU).contains(&body.angle),
                "angle {} escaped [0, 2π)",
                body.angle
            );
        }
    }

    #[test]
    fn negative_speed_wraps_below_zero() {
        let mut body = test_body(-2.0, 0.01);
        body.advance(1.0, 1.0); // one big retrograde step past zero
        assert!((0.0..TAU).contains(&body.angle));
        assert!(body.angle > PI, "retrograde wrap should land near 2π");
    }

    #[test]
    fn position_lies_on_orbit_circle() {
        let sun = Vec2::new(10_000.0, 10_000.0);
        let mut body = test_body(0.8, 1.3);
        for _ in 0..500 {
            body.advance(0.016, ORBIT_TIME_SCALE);
            let dist = body.position(sun).distance(sun);
            assert!(
                (dist - body.orbit_radius).abs() < 1e-2,
                "body left its orbit circle: {dist}"
            );
        }
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut body = test_body(1.0, 2.0);
        body.advance(0.0, ORBIT_TIME_SCALE);
        assert_eq!(body.angle, 2.0);
    }

    #[test]
    fn catalog_names_are_unique_and_orbits_disjoint() {
        let catalog = planet_catalog();
        for (i, a) in catalog.iter().enumerate() {
            for b in catalog.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
                // No two orbit circles come close enough for bodies to touch.
                assert!(
                    (a.orbit_radius - b.orbit_radius).abs() > a.radius + b.radius,
                    "{} and {} could overlap",
                    a.name,
                    b.name
                );
            }
        }
    }

    #[test]
    fn snapshot_preserves_catalog_order() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.init_resource::<PlanetSnapshot>();
        let config = GameConfig::default();
        let sun = config.sun_pos();
        for (index, spec) in planet_catalog().into_iter().enumerate() {
            let body = CelestialBody::from_spec(index, &spec);
            let pos = body.position(sun);
            app.world_mut()
                .spawn((body, Transform::from_translation(pos.extend(0.0))));
        }
        app.add_systems(Update, planet_snapshot_system);
        app.update();

        let snapshot = app.world().resource::<PlanetSnapshot>();
        let names: Vec<&str> = snapshot.planets.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = planet_catalog().iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
        assert_eq!(snapshot.body_by_name("Mercury").unwrap().material, "Iron");
        assert!(snapshot.body_by_name("Vulcan").is_none());
    }
}
