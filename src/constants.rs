//! Centralised world, ship, and economy constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! `GameConfig` in [`crate::config`] mirrors every constant and can override
//! any of them from `assets/game.toml` at startup.

// ── World ─────────────────────────────────────────────────────────────────────

/// Width of the world in world units.
///
/// Large enough to contain every orbit in the catalog; the outermost body
/// (Trappist-1h) orbits at 10 200 u from the centre, so anything below
/// ~21 000 clips its orbit against the world edge.
pub const WORLD_WIDTH: f32 = 20_000.0;

/// Height of the world in world units.
pub const WORLD_HEIGHT: f32 = 20_000.0;

/// Visual/collision radius of the central star.
///
/// The star is a fixed point at the world centre; it is the origin for every
/// orbital radius but is not itself a collision body.
pub const SUN_RADIUS: f32 = 150.0;

/// Scaling applied to `body.speed × dt` when advancing orbital angles.
///
/// At 0.05 a body with speed 1.0 completes a revolution in ~126 s of game
/// time — slow enough that planets feel stationary on approach but visibly
/// drift over a play session. Raising this makes landing harder (bodies move
/// under the ship); lowering it makes the map effectively static.
pub const ORBIT_TIME_SCALE: f32 = 0.05;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Starting ship size (diameter-equivalent, world units).
///
/// Half of this is added to a body's radius for both the landing threshold
/// and the landed anchor distance. Grows with Size rewards/upgrades.
pub const SHIP_SIZE: f32 = 20.0;

/// Starting ship speed stat (dimensionless; see [`SPEED_SCALE`]).
pub const SHIP_SPEED: f32 = 5.0;

/// World units per second of travel per point of the speed stat.
///
/// Effective cruise velocity = `speed × SPEED_SCALE`. At the starting stat of
/// 5.0 this is 300 u/s, crossing the inner system (Mercury's 600 u orbit) in
/// a few seconds while keeping the outer systems a real journey.
pub const SPEED_SCALE: f32 = 60.0;

/// Reverse thrust magnitude relative to forward thrust.
pub const REVERSE_FACTOR: f32 = 0.5;

/// Turn rate (rad/s) applied while a turn input is held.
pub const ROTATION_SPEED: f32 = 3.0;

/// Starting (and base maximum) hull integrity.
pub const SHIP_MAX_HP: f32 = 100.0;

/// Starting (and base maximum) fuel load.
pub const FUEL_CAPACITY: f32 = 100.0;

/// Fuel consumed per second of thrust at efficiency 1.0.
///
/// A full tank gives 50 s of continuous burn at base efficiency — enough to
/// reach Alpha Centauri from Earth with margin, tight enough that Fuel
/// Efficiency upgrades matter.
pub const FUEL_BURN_RATE: f32 = 2.0;

// ── Collection ────────────────────────────────────────────────────────────────

/// Distance beyond a body's radius at which quest material is harvested.
///
/// Deliberately larger than the landing threshold (`radius + size/2`) so the
/// ship starts collecting on final approach, not only once docked.
pub const COLLECT_RANGE_BUFFER: f32 = 80.0;

// ── Economy ───────────────────────────────────────────────────────────────────

/// Seconds between revenue payouts from each owned base.
pub const REVENUE_INTERVAL_SECS: f32 = 5.0;

/// Credits paid per interval by a level-1 base.
pub const BASE_REVENUE_AMOUNT: u32 = 10;

/// Geometric growth of base revenue per level:
/// `payout = BASE_REVENUE_AMOUNT × BASE_REVENUE_MULTIPLIER^(level − 1)`.
pub const BASE_REVENUE_MULTIPLIER: f32 = 2.0;

/// Cost to establish a base on a planet.
pub const BASE_BUILD_COST: u32 = 100;

/// Base-upgrade cost per current level: upgrading a level-N base costs
/// `N × BASE_UPGRADE_COST_PER_LEVEL`.
pub const BASE_UPGRADE_COST_PER_LEVEL: u32 = 150;

/// Maximum base level (inclusive).
pub const MAX_BASE_LEVEL: u32 = 5;

// ── Progression ───────────────────────────────────────────────────────────────

/// Duration of the hyperjump transition when a star system is cleared.
///
/// Cosmetic: quest gating switches to the new system immediately; this timer
/// only drives the UI-facing "in hyperjump" flag.
pub const HYPERJUMP_DURATION_SECS: f32 = 2.5;

/// Angular offset (radians) behind Earth's start angle at which the ship
/// spawns, on Earth's orbit. Small enough to start within sight of Earth,
/// large enough not to spawn inside its landing threshold.
pub const START_ANGLE_OFFSET: f32 = 0.05;
