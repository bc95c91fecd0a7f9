//! The simulation plugin: resource registration, world setup, and the fixed
//! per-tick pipeline.
//!
//! Update order matters and is pinned with an explicit chain:
//!
//! 1. clear the intent, then let input sources repopulate it
//! 2. advance orbits and rebuild the planet snapshot
//! 3. navigate the ship against the fresh snapshot
//! 4. evaluate quests against the final ship position
//! 5. accrue base revenue
//!
//! Everything runs in the plain `Update` schedule so headless tests drive
//! the whole pipeline with `app.update()`.

use crate::config::GameConfig;
use crate::economy::{base_revenue_system, Bases, Revenue, TechTree};
use crate::orbit::{
    advance_orbits_system, planet_snapshot_system, spawn_celestial_bodies, PlanetSnapshot,
};
use crate::quest::{quest_tick_system, GameWon, Inventory, QuestCompleted, QuestLog};
use crate::ship::control::{
    intent_clear_system, keyboard_to_intent_system, ship_navigation_system,
};
use crate::ship::state::spawn_ship;
use crate::ship::{FlightStatus, ShipIntent, ShipStats};
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<ShipIntent>()
            .init_resource::<ShipStats>()
            .init_resource::<FlightStatus>()
            .init_resource::<PlanetSnapshot>()
            .init_resource::<QuestLog>()
            .init_resource::<Inventory>()
            .init_resource::<GameWon>()
            .init_resource::<Bases>()
            .init_resource::<Revenue>()
            .init_resource::<TechTree>()
            .add_message::<QuestCompleted>()
            .add_systems(Startup, (spawn_world, spawn_ship))
            .add_systems(
                Update,
                (
                    intent_clear_system,
                    // Keyboard input only exists when an input plugin is
                    // loaded; headless tests write the intent themselves.
                    keyboard_to_intent_system
                        .run_if(resource_exists::<ButtonInput<KeyCode>>),
                    advance_orbits_system,
                    planet_snapshot_system,
                    ship_navigation_system,
                    quest_tick_system,
                    base_revenue_system,
                )
                    .chain(),
            );
    }
}

fn spawn_world(mut commands: Commands, config: Res<GameConfig>) {
    spawn_celestial_bodies(&mut commands, &config);
}
