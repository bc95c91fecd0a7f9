//! Core simulation for a 2D space exploration game.
//!
//! A single ship flies through three star systems of orbiting planets,
//! landing to ride along with them, harvesting materials for a quest chain,
//! and spending passive base revenue on tech upgrades.  The whole simulation
//! is deterministic given a frame-time sequence and runs headless; rendering
//! and UI are collaborators layered on top of these resources, not part of
//! the core.
//!
//! [`simulation::SimulationPlugin`] wires everything together.

pub mod config;
pub mod constants;
pub mod economy;
pub mod orbit;
pub mod quest;
pub mod ship;
pub mod simulation;
