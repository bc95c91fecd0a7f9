//! Quest progression: a single globally-active objective, material harvesting
//! gated by it, and system-to-system advancement.
//!
//! ## Model
//!
//! Quests live in one flat list partitioned into contiguous **star system**
//! ranges.  Exactly one system is current; within it the *active quest* is
//! the lowest-indexed incomplete quest.  Harvesting only ever credits the
//! active quest, and only at the body whose **name and material both** match
//! it.  When every quest in the current range is complete the log hyperjumps
//! to the next system; clearing the last range is terminal.
//!
//! ## Per-tick algorithm ([`quest_tick_system`])
//!
//! 1. Resolve the active quest (guarded; out-of-range indices mean "no
//!    active quest", never a panic).
//! 2. If the ship is within collection range of the quest's body and the
//!    body's material matches, harvest exactly one unit this tick
//!    (continuous auto-harvest — no keypress).
//! 3. On reaching the required amount: mark complete, apply the reward
//!    atomically, emit [`QuestCompleted`], and re-resolve the pointer —
//!    possibly hyperjumping or reaching the terminal state.
//!
//! A `win` reward marks the game won; from the next tick on quest evaluation
//! short-circuits entirely (the simulation itself keeps running).

use crate::config::GameConfig;
use crate::orbit::PlanetSnapshot;
use crate::ship::{Ship, ShipFuel, ShipHealth, ShipStats};
use bevy::prelude::*;
use std::collections::HashMap;

// ── Rewards ───────────────────────────────────────────────────────────────────

/// Effects granted when a quest completes.  Every field defaults to
/// "no effect"; a single exhaustive [`apply_reward`] applies them all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    /// Added to the ship speed stat.
    pub speed: f32,
    /// Added to the ship size (collision + visual scale).
    pub size: f32,
    /// Added to both current and maximum hull integrity.
    pub health: f32,
    /// Fuel granted, clamped at capacity.
    pub fuel: f32,
    /// Multiplied into the fuel burn multiplier (values < 1.0 reduce burn).
    pub fuel_efficiency: f32,
    /// Marks the game as won.
    pub win: bool,
}

impl Default for Reward {
    fn default() -> Self {
        Self {
            speed: 0.0,
            size: 0.0,
            health: 0.0,
            fuel: 0.0,
            fuel_efficiency: 1.0,
            win: false,
        }
    }
}

/// Apply every reward effect in one pass.
pub fn apply_reward(
    reward: &Reward,
    stats: &mut ShipStats,
    health: &mut ShipHealth,
    fuel: &mut ShipFuel,
    won: &mut GameWon,
) {
    stats.speed += reward.speed;
    stats.size += reward.size;
    if reward.health != 0.0 {
        health.max_hp += reward.health;
        health.hp = (health.hp + reward.health).min(health.max_hp);
    }
    if reward.fuel != 0.0 {
        fuel.fuel = (fuel.fuel + reward.fuel).min(fuel.capacity);
    }
    fuel.efficiency *= reward.fuel_efficiency;
    if reward.win {
        won.0 = true;
    }
}

// ── Quests & systems ──────────────────────────────────────────────────────────

/// One material-collection objective.
#[derive(Debug, Clone)]
pub struct Quest {
    pub desc: String,
    /// Target body name.  Must match together with `material`.
    pub planet: String,
    pub material: String,
    pub amount: u32,
    /// `0 ≤ collected ≤ amount`.
    pub collected: u32,
    /// Monotonic false → true.
    pub completed: bool,
    pub reward: Reward,
}

/// A contiguous group of quests tied to one cluster of bodies.
#[derive(Debug, Clone)]
pub struct StarSystem {
    pub name: String,
    /// First quest index in this system (inclusive).
    pub start: usize,
    /// One past the last quest index (exclusive).
    pub end: usize,
    /// Story lines shown on arrival.  Cosmetic.
    pub intro: &'static [&'static str],
}

/// The quest log: the full objective list, its system partition, and the
/// progression pointers.
///
/// `current_quest_index` is kept in sync with the first-incomplete rule for
/// UI display; `quests.len()` is the terminal sentinel once the last system
/// is cleared.
#[derive(Resource, Debug, Clone)]
pub struct QuestLog {
    pub quests: Vec<Quest>,
    pub systems: Vec<StarSystem>,
    pub current_system: usize,
    pub current_quest_index: usize,
    /// Remaining seconds of the cosmetic hyperjump transition.
    pub hyperjump_timer: f32,
}

impl Default for QuestLog {
    /// A fresh copy of the campaign template, so re-running never shares
    /// quest state between games.
    fn default() -> Self {
        let (quests, systems) = quest_catalog();
        Self {
            quests,
            systems,
            current_system: 0,
            current_quest_index: 0,
            hyperjump_timer: 0.0,
        }
    }
}

impl QuestLog {
    /// The current star system, or `None` past the end (boundary guard).
    pub fn current_star_system(&self) -> Option<&StarSystem> {
        self.systems.get(self.current_system)
    }

    /// Index of the active quest: the first incomplete quest in the current
    /// system's range.  `None` when the system is cleared, the range is
    /// empty, or any index is out of bounds.
    pub fn active_quest_index(&self) -> Option<usize> {
        let system = self.current_star_system()?;
        let end = system.end.min(self.quests.len());
        (system.start..end).find(|&i| !self.quests[i].completed)
    }

    pub fn active_quest(&self) -> Option<&Quest> {
        self.active_quest_index().map(|i| &self.quests[i])
    }

    /// Terminal state: the last system has been cleared.
    pub fn all_complete(&self) -> bool {
        self.current_quest_index >= self.quests.len()
    }

    pub fn in_hyperjump(&self) -> bool {
        self.hyperjump_timer > 0.0
    }
}

// ── Campaign catalog ──────────────────────────────────────────────────────────

const SOL_INTRO: &[&str] = &[
    "You are Errin, a pioneer of the Galactic Expansion Fleet.",
    "Your mission: travel to distant planets, colonize them, and extract their resources for humanity's future.",
    "Each world in your home solar system holds unique materials vital for Earth's survival and the growth of the new colonies.",
    "From the burning iron of Mercury to the icy reaches of Pluto, every planet offers new challenges and opportunities.",
];

const CENTAURI_INTRO: &[&str] = &[
    "With Earth's future secured, your journey continues to Alpha Centauri, a system of three suns and a host of new worlds.",
    "Here, you must adapt to alien atmospheres, harvest exotic elements, and build outposts on planets never before seen by human eyes.",
    "The twin planets of Centauri Prime and Secundus are rich in rare crystals and volatile gases, while the outer ice giants hide secrets beneath their frozen crusts.",
];

const TRAPPIST_INTRO: &[&str] = &[
    "Your final destination is the mysterious Trappist-1 system, a compact family of seven rocky worlds orbiting a cool red star.",
    "Survive the harsh conditions, unlock advanced technology, and establish the first interstellar civilization among the stars.",
    "The fate of humanity now stretches across three solar systems. Your courage and ingenuity will determine the future of all!",
];

fn quest(desc: &str, planet: &str, material: &str, amount: u32, reward: Reward) -> Quest {
    Quest {
        desc: desc.to_string(),
        planet: planet.to_string(),
        material: material.to_string(),
        amount,
        collected: 0,
        completed: false,
        reward,
    }
}

/// The campaign template: ten quests across three star systems.
pub fn quest_catalog() -> (Vec<Quest>, Vec<StarSystem>) {
    let quests = vec![
        // ── Sol ──────────────────────────────────────────────────────────────
        quest(
            "Colonize Mercury and extract 3 Iron for Earth's new outpost.",
            "Mercury",
            "Iron",
            3,
            Reward { speed: 1.0, ..Default::default() },
        ),
        quest(
            "Establish a mining base on Venus and collect 2 Sulfur for advanced fuel.",
            "Venus",
            "Sulfur",
            2,
            Reward { speed: 1.0, ..Default::default() },
        ),
        quest(
            "Terraform Earth by gathering 2 Water for the new colony's life support.",
            "Earth",
            "Water",
            2,
            Reward { size: 10.0, ..Default::default() },
        ),
        quest(
            "Exploit Mars for 4 Silicon to build the first Martian city.",
            "Mars",
            "Silicon",
            4,
            Reward { win: true, ..Default::default() },
        ),
        // ── Alpha Centauri ───────────────────────────────────────────────────
        quest(
            "Travel to Centauri Prime and collect 5 Xenon for advanced propulsion.",
            "Centauri Prime",
            "Xenon",
            5,
            Reward { fuel: 30.0, ..Default::default() },
        ),
        quest(
            "Harvest 3 Crystal from Centauri Secundus for quantum computers.",
            "Centauri Secundus",
            "Crystal",
            3,
            Reward { size: 10.0, ..Default::default() },
        ),
        quest(
            "Collect 4 Helium-3 from the gas giant Centauri Tertius.",
            "Centauri Tertius",
            "Helium-3",
            4,
            Reward { fuel_efficiency: 0.8, ..Default::default() },
        ),
        // ── Trappist-1 ───────────────────────────────────────────────────────
        quest(
            "Land on Trappist-1e and gather 6 Organics for terraforming.",
            "Trappist-1e",
            "Organics",
            6,
            Reward { health: 30.0, ..Default::default() },
        ),
        quest(
            "Mine 5 Ice from Trappist-1g for water reserves.",
            "Trappist-1g",
            "Ice",
            5,
            Reward { fuel: 40.0, ..Default::default() },
        ),
        quest(
            "Establish a base on Trappist-1h and collect 3 Rare Metals.",
            "Trappist-1h",
            "Rare Metals",
            3,
            Reward { win: true, ..Default::default() },
        ),
    ];
    let systems = vec![
        StarSystem { name: "Sol".to_string(), start: 0, end: 4, intro: SOL_INTRO },
        StarSystem { name: "Alpha Centauri".to_string(), start: 4, end: 7, intro: CENTAURI_INTRO },
        StarSystem { name: "Trappist-1".to_string(), start: 7, end: 10, intro: TRAPPIST_INTRO },
    ];
    (quests, systems)
}

// ── Inventory ─────────────────────────────────────────────────────────────────

/// Collected materials, keyed by material name.  Unbounded; incremented only
/// by quest-gated collection.
#[derive(Resource, Debug, Clone, Default)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    pub fn add(&mut self, material: &str, amount: u32) {
        *self.items.entry(material.to_string()).or_insert(0) += amount;
    }

    pub fn count(&self, material: &str) -> u32 {
        self.items.get(material).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ── Win flag & messages ───────────────────────────────────────────────────────

/// Set by a `win` reward.  Once true, quest evaluation short-circuits; the
/// simulation itself keeps ticking.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GameWon(pub bool);

/// Emitted once per quest completion so UI collaborators can react without
/// polling the log.
#[derive(Message, Debug, Clone)]
pub struct QuestCompleted {
    pub quest_index: usize,
    pub planet: String,
}

// ── Per-tick evaluation ───────────────────────────────────────────────────────

/// Advance the quest state machine for this tick: harvest at the active
/// quest's body, complete quests, apply rewards, and hyperjump between
/// systems.
#[allow(clippy::too_many_arguments)]
pub fn quest_tick_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    snapshot: Res<PlanetSnapshot>,
    mut q_ship: Query<(&Transform, &mut ShipHealth, &mut ShipFuel), With<Ship>>,
    mut stats: ResMut<ShipStats>,
    mut log: ResMut<QuestLog>,
    mut inventory: ResMut<Inventory>,
    mut won: ResMut<GameWon>,
    mut completions: MessageWriter<QuestCompleted>,
) {
    log.hyperjump_timer = (log.hyperjump_timer - time.delta_secs()).max(0.0);

    if won.0 {
        return;
    }
    let Ok((transform, mut health, mut fuel)) = q_ship.single_mut() else {
        return;
    };
    let Some(idx) = log.active_quest_index() else {
        return;
    };
    // Keep the explicit UI pointer on the first-incomplete quest.
    log.current_quest_index = idx;

    let ship_pos = transform.translation.truncate();
    let (planet, material, amount) = {
        let quest = &log.quests[idx];
        (quest.planet.clone(), quest.material.clone(), quest.amount)
    };
    let Some(body) = snapshot.body_by_name(&planet) else {
        return;
    };
    // Both name and material must match; a body sharing only the material
    // (or only the name) never counts.
    if body.material != material {
        return;
    }
    if ship_pos.distance(body.pos) >= body.radius + config.collect_range_buffer {
        return;
    }

    // Qualifying tick: harvest exactly one unit.
    let quest = &mut log.quests[idx];
    quest.collected += 1;
    inventory.add(&material, 1);
    if quest.collected < amount {
        return;
    }

    quest.completed = true;
    let reward = quest.reward;
    apply_reward(&reward, &mut stats, &mut health, &mut fuel, &mut won);
    info!("Quest complete: {}", log.quests[idx].desc);
    completions.write(QuestCompleted {
        quest_index: idx,
        planet,
    });
    advance_after_completion(&mut log, &config);
}

/// Re-resolve the quest pointer after a completion: next incomplete quest in
/// range, or hyperjump to the next system, or the terminal sentinel.
fn advance_after_completion(log: &mut QuestLog, config: &GameConfig) {
    if let Some(next) = log.active_quest_index() {
        log.current_quest_index = next;
        return;
    }
    if log.current_system + 1 < log.systems.len() {
        log.current_system += 1;
        log.current_quest_index = log.systems[log.current_system].start;
        log.hyperjump_timer = config.hyperjump_duration_secs;
        let system = &log.systems[log.current_system];
        info!("Hyperjump: arriving in the {} system", system.name);
        for line in system.intro {
            info!("  {line}");
        }
    } else {
        // Last system cleared: terminal sentinel, nothing left to evaluate.
        log.current_quest_index = log.quests.len();
        info!("All objectives complete. You have secured the future of humanity.");
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
