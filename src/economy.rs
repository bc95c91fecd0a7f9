//! Bases, passive revenue, and the tech tree.
//!
//! Money (`Revenue`) is earned passively by per-planet bases and spent on
//! tech upgrades or further base levels.  Every purchase path is a plain
//! function returning a [`PurchaseOutcome`]; a declined purchase is an
//! ordinary answer, not an error.

use crate::config::GameConfig;
use crate::ship::{ShipFuel, ShipHealth, ShipStats};
use bevy::prelude::*;
use std::collections::HashMap;

// ── Bases & revenue ───────────────────────────────────────────────────────────

/// A colony base on one planet.
#[derive(Debug, Clone)]
pub struct Base {
    /// `1 ..= config.max_base_level`.
    pub level: u32,
    /// Seconds accumulated toward the next revenue interval.
    pub accrual_timer: f32,
}

impl Base {
    fn new() -> Self {
        Self {
            level: 1,
            accrual_timer: 0.0,
        }
    }
}

/// All built bases, keyed by planet name.  At most one base per planet.
#[derive(Resource, Debug, Clone, Default)]
pub struct Bases {
    bases: HashMap<String, Base>,
}

impl Bases {
    pub fn get(&self, planet: &str) -> Option<&Base> {
        self.bases.get(planet)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Accumulated money.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Revenue(pub u32);

/// Payout of one revenue interval for a base at `level`.
///
/// Geometric in the level: `amount × multiplier^(level − 1)`.
pub fn base_revenue_at_level(level: u32, config: &GameConfig) -> u32 {
    let scaled = config.base_revenue_amount as f32
        * config.base_revenue_multiplier.powi(level.saturating_sub(1) as i32);
    scaled as u32
}

/// Advance one base's accrual timer and return the revenue it pays out.
///
/// Handles dt spanning multiple intervals, paying once per elapsed interval
/// so a stalled frame never loses income.
fn accrue(base: &mut Base, dt: f32, config: &GameConfig) -> u32 {
    base.accrual_timer += dt;
    let mut payout = 0;
    while base.accrual_timer >= config.revenue_interval_secs {
        base.accrual_timer -= config.revenue_interval_secs;
        payout += base_revenue_at_level(base.level, config);
    }
    payout
}

/// Tick every base's accrual timer and bank the payouts.
pub fn base_revenue_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut bases: ResMut<Bases>,
    mut revenue: ResMut<Revenue>,
) {
    let dt = time.delta_secs();
    for base in bases.bases.values_mut() {
        revenue.0 += accrue(base, dt, &config);
    }
}

// ── Purchase outcomes ─────────────────────────────────────────────────────────

/// Result of any purchase attempt.  Declines are answers, not errors; the
/// caller's money is untouched unless the outcome is `Purchased`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { cost: u32 },
    InsufficientFunds { needed: u32, have: u32 },
    AlreadyMaxed,
    AlreadyBuilt,
    NotBuilt,
    UnknownUpgrade,
}

impl PurchaseOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

// ── Base purchases ────────────────────────────────────────────────────────────

/// Build a level-1 base on `planet`.
pub fn build_base(
    planet: &str,
    bases: &mut Bases,
    revenue: &mut Revenue,
    config: &GameConfig,
) -> PurchaseOutcome {
    if bases.bases.contains_key(planet) {
        return PurchaseOutcome::AlreadyBuilt;
    }
    let cost = config.base_build_cost;
    if revenue.0 < cost {
        return PurchaseOutcome::InsufficientFunds {
            needed: cost,
            have: revenue.0,
        };
    }
    revenue.0 -= cost;
    bases.bases.insert(planet.to_string(), Base::new());
    info!("Base established on {planet}");
    PurchaseOutcome::Purchased { cost }
}

/// Raise an existing base one level.  Cost grows linearly with the current
/// level; the accrual timer is untouched so an upgrade never forfeits
/// progress toward the next payout.
pub fn upgrade_base(
    planet: &str,
    bases: &mut Bases,
    revenue: &mut Revenue,
    config: &GameConfig,
) -> PurchaseOutcome {
    let Some(base) = bases.bases.get_mut(planet) else {
        return PurchaseOutcome::NotBuilt;
    };
    if base.level >= config.max_base_level {
        return PurchaseOutcome::AlreadyMaxed;
    }
    let cost = base.level * config.base_upgrade_cost_per_level;
    if revenue.0 < cost {
        return PurchaseOutcome::InsufficientFunds {
            needed: cost,
            have: revenue.0,
        };
    }
    revenue.0 -= cost;
    base.level += 1;
    info!("Base on {planet} upgraded to level {}", base.level);
    PurchaseOutcome::Purchased { cost }
}

// ── Tech tree ─────────────────────────────────────────────────────────────────

/// What one level of a tech upgrade does to the ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeEffect {
    /// Adds to the speed stat.
    Speed(f32),
    /// Adds to the ship size.
    Size(f32),
    /// Adds to fuel tank capacity (and grants the same amount of fuel).
    FuelCapacity(f32),
    /// Multiplied into the fuel burn multiplier per level.
    FuelEfficiency(f32),
    /// Adds to maximum hull integrity.
    MaxHealth(f32),
}

/// One purchasable tech line with a level cap and a flat per-level cost.
#[derive(Debug, Clone)]
pub struct TechUpgrade {
    pub name: String,
    pub desc: String,
    pub level: u32,
    pub max_level: u32,
    pub cost: u32,
    pub effect: UpgradeEffect,
}

/// The purchasable upgrade lines.
#[derive(Resource, Debug, Clone)]
pub struct TechTree {
    pub upgrades: Vec<TechUpgrade>,
}

impl Default for TechTree {
    fn default() -> Self {
        fn upgrade(name: &str, desc: &str, max: u32, cost: u32, effect: UpgradeEffect) -> TechUpgrade {
            TechUpgrade {
                name: name.to_string(),
                desc: desc.to_string(),
                level: 0,
                max_level: max,
                cost,
                effect,
            }
        }
        Self {
            upgrades: vec![
                upgrade("Speed", "Increase ship speed", 5, 150, UpgradeEffect::Speed(1.0)),
                upgrade("Size", "Increase ship size", 3, 200, UpgradeEffect::Size(10.0)),
                upgrade("Fuel Tank", "Increase fuel capacity", 3, 120, UpgradeEffect::FuelCapacity(25.0)),
                upgrade(
                    "Fuel Efficiency",
                    "Reduce fuel burn per thrust",
                    4,
                    180,
                    UpgradeEffect::FuelEfficiency(0.85),
                ),
                upgrade("Max Health", "Increase maximum hull", 3, 180, UpgradeEffect::MaxHealth(25.0)),
            ],
        }
    }
}

impl TechTree {
    pub fn get(&self, name: &str) -> Option<&TechUpgrade> {
        self.upgrades.iter().find(|u| u.name == name)
    }
}

/// Buy one level of the named upgrade and apply its effect to the ship.
pub fn purchase_upgrade(
    name: &str,
    tree: &mut TechTree,
    revenue: &mut Revenue,
    stats: &mut ShipStats,
    health: &mut ShipHealth,
    fuel: &mut ShipFuel,
) -> PurchaseOutcome {
    let Some(upgrade) = tree.upgrades.iter_mut().find(|u| u.name == name) else {
        return PurchaseOutcome::UnknownUpgrade;
    };
    if upgrade.level >= upgrade.max_level {
        return PurchaseOutcome::AlreadyMaxed;
    }
    if revenue.0 < upgrade.cost {
        return PurchaseOutcome::InsufficientFunds {
            needed: upgrade.cost,
            have: revenue.0,
        };
    }
    revenue.0 -= upgrade.cost;
    upgrade.level += 1;
    match upgrade.effect {
        UpgradeEffect::Speed(amount) => stats.speed += amount,
        UpgradeEffect::Size(amount) => stats.size += amount,
        UpgradeEffect::FuelCapacity(amount) => {
            fuel.capacity += amount;
            fuel.fuel = (fuel.fuel + amount).min(fuel.capacity);
        }
        UpgradeEffect::FuelEfficiency(factor) => fuel.efficiency *= factor,
        UpgradeEffect::MaxHealth(amount) => health.max_hp += amount,
    }
    info!("Upgrade purchased: {} (level {})", upgrade.name, upgrade.level);
    PurchaseOutcome::Purchased { cost: upgrade.cost }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    // ── Revenue accrual ───────────────────────────────────────────────────────

    #[test]
    fn base_pays_exactly_once_per_interval() {
        let cfg = config();
        let mut base = Base::new();
        // Interval is 5 s; 4.9 s pays nothing.
        assert_eq!(accrue(&mut base, 4.9, &cfg), 0);
        // Crossing the boundary pays exactly the level-1 amount.
        assert_eq!(accrue(&mut base, 0.2, &cfg), cfg.base_revenue_amount);
        // Timer keeps the 0.1 s remainder.
        assert!((base.accrual_timer - 0.1).abs() < 1e-4);
    }

    #[test]
    fn long_frame_pays_every_elapsed_interval() {
        let cfg = config();
        let mut base = Base::new();
        // Three intervals and a bit in one frame.
        let payout = accrue(&mut base, cfg.revenue_interval_secs * 3.0 + 1.0, &cfg);
        assert_eq!(payout, cfg.base_revenue_amount * 3);
        assert!((base.accrual_timer - 1.0).abs() < 1e-3);
    }

    #[test]
    fn revenue_grows_geometrically_with_level() {
        let cfg = config();
        assert_eq!(base_revenue_at_level(1, &cfg), 10);
        assert_eq!(base_revenue_at_level(2, &cfg), 20);
        assert_eq!(base_revenue_at_level(3, &cfg), 40);
        assert_eq!(base_revenue_at_level(5, &cfg), 160);
    }

    #[test]
    fn level_two_base_scenario() {
        // Interval 5 s, amount 10, multiplier 2: a level-2 base pays 20 after
        // exactly one interval, nothing at 4.9 s.
        let cfg = config();
        let mut base = Base { level: 2, accrual_timer: 0.0 };
        assert_eq!(accrue(&mut base, 4.9, &cfg), 0);
        assert_eq!(accrue(&mut base, 0.1, &cfg), 20);
    }

    #[test]
    fn revenue_system_banks_payouts_from_every_base() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config());
        app.init_resource::<Revenue>();
        let mut bases = Bases::default();
        // Seed timers just below the boundary so the first real frame pays.
        bases.bases.insert(
            "Mercury".to_string(),
            Base { level: 1, accrual_timer: 4.999 },
        );
        bases.bases.insert(
            "Venus".to_string(),
            Base { level: 2, accrual_timer: 4.999 },
        );
        app.insert_resource(bases);
        app.add_systems(Update, base_revenue_system);

        app.update();
        std::thread::sleep(std::time::Duration::from_millis(5));
        app.update();
        assert_eq!(app.world().resource::<Revenue>().0, 10 + 20);
    }

    // ── Base purchases ────────────────────────────────────────────────────────

    #[test]
    fn build_base_charges_and_registers() {
        let cfg = config();
        let mut bases = Bases::default();
        let mut revenue = Revenue(250);
        let outcome = build_base("Mercury", &mut bases, &mut revenue, &cfg);
        assert_eq!(outcome, PurchaseOutcome::Purchased { cost: 100 });
        assert_eq!(revenue.0, 150);
        assert_eq!(bases.get("Mercury").map(|b| b.level), Some(1));
    }

    #[test]
    fn build_base_declines_without_funds_or_twice() {
        let cfg = config();
        let mut bases = Bases::default();
        let mut revenue = Revenue(50);
        assert_eq!(
            build_base("Mercury", &mut bases, &mut revenue, &cfg),
            PurchaseOutcome::InsufficientFunds { needed: 100, have: 50 }
        );
        assert_eq!(revenue.0, 50);
        assert!(bases.is_empty());

        revenue.0 = 300;
        assert!(build_base("Mercury", &mut bases, &mut revenue, &cfg).succeeded());
        assert_eq!(
            build_base("Mercury", &mut bases, &mut revenue, &cfg),
            PurchaseOutcome::AlreadyBuilt
        );
        assert_eq!(revenue.0, 200, "a declined build must not charge");
    }

    #[test]
    fn upgrade_base_cost_scales_with_level_and_caps() {
        let cfg = config();
        let mut bases = Bases::default();
        let mut revenue = Revenue(10_000);
        build_base("Venus", &mut bases, &mut revenue, &cfg);

        // Level 1 → 2 costs 150, 2 → 3 costs 300, and so on up to the cap.
        assert_eq!(
            upgrade_base("Venus", &mut bases, &mut revenue, &cfg),
            PurchaseOutcome::Purchased { cost: 150 }
        );
        assert_eq!(
            upgrade_base("Venus", &mut bases, &mut revenue, &cfg),
            PurchaseOutcome::Purchased { cost: 300 }
        );
        for _ in 0..2 {
            assert!(upgrade_base("Venus", &mut bases, &mut revenue, &cfg).succeeded());
        }
        assert_eq!(bases.get("Venus").map(|b| b.level), Some(cfg.max_base_level));
        assert_eq!(
            upgrade_base("Venus", &mut bases, &mut revenue, &cfg),
            PurchaseOutcome::AlreadyMaxed
        );
    }

    #[test]
    fn upgrade_base_declines_when_not_built() {
        let cfg = config();
        let mut bases = Bases::default();
        let mut revenue = Revenue(1_000);
        assert_eq!(
            upgrade_base("Pluto", &mut bases, &mut revenue, &cfg),
            PurchaseOutcome::NotBuilt
        );
        assert_eq!(revenue.0, 1_000);
    }

    #[test]
    fn upgrade_preserves_the_accrual_timer() {
        let cfg = config();
        let mut bases = Bases::default();
        let mut revenue = Revenue(1_000);
        build_base("Earth", &mut bases, &mut revenue, &cfg);
        if let Some(base) = bases.bases.get_mut("Earth") {
            base.accrual_timer = 3.0;
        }
        assert!(upgrade_base("Earth", &mut bases, &mut revenue, &cfg).succeeded());
        assert_eq!(bases.get("Earth").map(|b| b.accrual_timer), Some(3.0));
    }

    // ── Tech upgrades ─────────────────────────────────────────────────────────

    fn ship_state() -> (ShipStats, ShipHealth, ShipFuel) {
        (ShipStats::default(), ShipHealth::default(), ShipFuel::default())
    }

    #[test]
    fn purchase_speed_upgrade_applies_and_charges() {
        let mut tree = TechTree::default();
        let mut revenue = Revenue(200);
        let (mut stats, mut health, mut fuel) = ship_state();
        let outcome =
            purchase_upgrade("Speed", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel);
        assert_eq!(outcome, PurchaseOutcome::Purchased { cost: 150 });
        assert_eq!(revenue.0, 50);
        assert_eq!(stats.speed, ShipStats::default().speed + 1.0);
        assert_eq!(tree.get("Speed").map(|u| u.level), Some(1));
    }

    #[test]
    fn purchase_declines_leave_everything_untouched() {
        let mut tree = TechTree::default();
        let mut revenue = Revenue(10);
        let (mut stats, mut health, mut fuel) = ship_state();

        assert_eq!(
            purchase_upgrade("Speed", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel),
            PurchaseOutcome::InsufficientFunds { needed: 150, have: 10 }
        );
        assert_eq!(
            purchase_upgrade("Warp Drive", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel),
            PurchaseOutcome::UnknownUpgrade
        );
        assert_eq!(revenue.0, 10);
        assert_eq!(stats, ShipStats::default());
        assert_eq!(tree.get("Speed").map(|u| u.level), Some(0));
    }

    #[test]
    fn upgrade_line_caps_at_max_level() {
        let mut tree = TechTree::default();
        let mut revenue = Revenue(100_000);
        let (mut stats, mut health, mut fuel) = ship_state();
        for _ in 0..3 {
            assert!(purchase_upgrade("Size", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel)
                .succeeded());
        }
        assert_eq!(
            purchase_upgrade("Size", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel),
            PurchaseOutcome::AlreadyMaxed
        );
        assert_eq!(stats.size, ShipStats::default().size + 30.0);
    }

    #[test]
    fn fuel_upgrades_touch_capacity_and_efficiency() {
        let mut tree = TechTree::default();
        let mut revenue = Revenue(1_000);
        let (mut stats, mut health, mut fuel) = ship_state();

        assert!(purchase_upgrade("Fuel Tank", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel)
            .succeeded());
        assert_eq!(fuel.capacity, 125.0);
        assert_eq!(fuel.fuel, 125.0);

        assert!(
            purchase_upgrade("Fuel Efficiency", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel)
                .succeeded()
        );
        assert!((fuel.efficiency - 0.85).abs() < 1e-6);

        assert!(purchase_upgrade("Max Health", &mut tree, &mut revenue, &mut stats, &mut health, &mut fuel)
            .succeeded());
        assert_eq!(health.max_hp, ShipHealth::default().max_hp + 25.0);
    }
}
