//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.orbit_time_scale`, `config.collect_range_buffer`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable world, ship, and economy configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,
    pub sun_radius: f32,
    pub orbit_time_scale: f32,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_size: f32,
    pub ship_speed: f32,
    pub speed_scale: f32,
    pub reverse_factor: f32,
    pub rotation_speed: f32,
    pub ship_max_hp: f32,
    pub fuel_capacity: f32,
    pub fuel_burn_rate: f32,

    // ── Collection ───────────────────────────────────────────────────────────
    pub collect_range_buffer: f32,

    // ── Economy ──────────────────────────────────────────────────────────────
    pub revenue_interval_secs: f32,
    pub base_revenue_amount: u32,
    pub base_revenue_multiplier: f32,
    pub base_build_cost: u32,
    pub base_upgrade_cost_per_level: u32,
    pub max_base_level: u32,

    // ── Progression ──────────────────────────────────────────────────────────
    pub hyperjump_duration_secs: f32,
    pub start_angle_offset: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            sun_radius: SUN_RADIUS,
            orbit_time_scale: ORBIT_TIME_SCALE,
            // Ship
            ship_size: SHIP_SIZE,
            ship_speed: SHIP_SPEED,
            speed_scale: SPEED_SCALE,
            reverse_factor: REVERSE_FACTOR,
            rotation_speed: ROTATION_SPEED,
            ship_max_hp: SHIP_MAX_HP,
            fuel_capacity: FUEL_CAPACITY,
            fuel_burn_rate: FUEL_BURN_RATE,
            // Collection
            collect_range_buffer: COLLECT_RANGE_BUFFER,
            // Economy
            revenue_interval_secs: REVENUE_INTERVAL_SECS,
            base_revenue_amount: BASE_REVENUE_AMOUNT,
            base_revenue_multiplier: BASE_REVENUE_MULTIPLIER,
            base_build_cost: BASE_BUILD_COST,
            base_upgrade_cost_per_level: BASE_UPGRADE_COST_PER_LEVEL,
            max_base_level: MAX_BASE_LEVEL,
            // Progression
            hyperjump_duration_secs: HYPERJUMP_DURATION_SECS,
            start_angle_offset: START_ANGLE_OFFSET,
        }
    }
}

impl GameConfig {
    /// Fixed world-space position of the central star: the world centre.
    ///
    /// Every orbital radius in the catalog is measured from this point.
    #[inline]
    pub fn sun_pos(&self) -> Vec2 {
        Vec2::new(self.world_width / 2.0, self.world_height / 2.0)
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the game.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded game config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.world_width, WORLD_WIDTH);
        assert_eq!(config.orbit_time_scale, ORBIT_TIME_SCALE);
        assert_eq!(config.base_revenue_amount, BASE_REVENUE_AMOUNT);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: GameConfig = toml::from_str("ship_speed = 9.0").unwrap();
        assert_eq!(config.ship_speed, 9.0);
        assert_eq!(config.ship_size, SHIP_SIZE);
        assert_eq!(config.collect_range_buffer, COLLECT_RANGE_BUFFER);
    }

    #[test]
    fn sun_sits_at_world_centre() {
        let config = GameConfig::default();
        assert_eq!(
            config.sun_pos(),
            Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0)
        );
    }
}
