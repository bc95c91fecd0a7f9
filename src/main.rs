//! Headless game loop.
//!
//! Runs the full simulation at 60 Hz with no window: a simple autopilot
//! stands in for the player, flying quest to quest until the campaign is
//! won, logging mission progress along the way.  Useful for soak-testing
//! the core and for watching a full playthrough from the terminal.

use bevy::app::{AppExit, ScheduleRunnerPlugin};
use bevy::prelude::*;
use std::time::Duration;

use space_explorer::config::{self, GameConfig};
use space_explorer::orbit::PlanetSnapshot;
use space_explorer::quest::{GameWon, QuestCompleted, QuestLog};
use space_explorer::ship::control::{intent_clear_system, ship_navigation_system};
use space_explorer::ship::{FlightStatus, Ship, ShipIntent};
use space_explorer::simulation::SimulationPlugin;

const TICK: f64 = 1.0 / 60.0;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(TICK))),
        )
        .add_plugins(bevy::log::LogPlugin::default())
        .init_resource::<GameConfig>()
        .add_systems(PreStartup, config::load_game_config)
        .add_plugins(SimulationPlugin)
        .add_systems(Startup, log_opening)
        .add_systems(
            Update,
            (
                autopilot_system
                    .after(intent_clear_system)
                    .before(ship_navigation_system),
                mission_log_system,
                exit_when_won_system,
            ),
        )
        .run();
}

fn log_opening(log: Res<QuestLog>) {
    if let Some(system) = log.current_star_system() {
        info!("=== {} ===", system.name);
        for line in system.intro {
            info!("{line}");
        }
    }
    if let Some(quest) = log.active_quest() {
        info!("Objective: {}", quest.desc);
    }
}

/// Fly straight at the active quest's planet.
///
/// Turning and thrusting are the same intent bits the keyboard would set, so
/// the autopilot exercises exactly the player-facing control path.  Landing
/// on the target is fine: collection only needs proximity, and the ship
/// rides the planet while harvesting.  If it ends up landed anywhere else it
/// lifts off again.
fn autopilot_system(
    log: Res<QuestLog>,
    snapshot: Res<PlanetSnapshot>,
    status: Res<FlightStatus>,
    q_ship: Query<&Transform, With<Ship>>,
    mut intent: ResMut<ShipIntent>,
) {
    let Some(quest) = log.active_quest() else {
        return;
    };
    let Some(target) = snapshot.body_by_name(&quest.planet) else {
        return;
    };
    let Ok(transform) = q_ship.single() else {
        return;
    };

    if let Some(planet) = status.landed_on() {
        if planet != quest.planet {
            intent.takeoff = true;
        }
        return;
    }

    let pos = transform.translation.truncate();
    let to_target = target.pos - pos;
    if to_target.length_squared() < 1.0 {
        return;
    }
    let forward = (transform.rotation * Vec3::Y).truncate();
    let steer = forward.perp_dot(to_target);
    if steer.abs() > 0.02 * to_target.length() {
        intent.turn_left = steer > 0.0;
        intent.turn_right = steer < 0.0;
    }
    // Thrust only while roughly on heading so the approach converges.
    if forward.dot(to_target) > 0.7 * to_target.length() {
        intent.thrust = true;
    }
}

/// Narrate landings and quest completions.
fn mission_log_system(
    status: Res<FlightStatus>,
    log: Res<QuestLog>,
    mut completions: MessageReader<QuestCompleted>,
    mut last_landed: Local<Option<String>>,
) {
    let landed = status.landed_on().map(str::to_string);
    if landed != *last_landed {
        match &landed {
            Some(planet) => info!("Touched down on {planet}"),
            None => info!("Lifted off"),
        }
        *last_landed = landed;
    }
    for completion in completions.read() {
        info!("Objective secured at {}", completion.planet);
        if let Some(next) = log.active_quest() {
            info!("Next objective: {}", next.desc);
        }
    }
}

fn exit_when_won_system(won: Res<GameWon>, mut exit: MessageWriter<AppExit>) {
    if won.0 {
        info!("Campaign won. Shutting down.");
        exit.write(AppExit::Success);
    }
}
