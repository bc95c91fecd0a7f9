//! Ship: entity, state machine, and navigation systems.
//!
//! - [`state`] — components, resources, and the [`state::FlightStatus`]
//!   flying/landed state machine data.
//! - [`control`] — intent pipeline and the navigation/collision systems.

pub mod control;
pub mod state;

pub use state::{FlightStatus, Ship, ShipFuel, ShipHealth, ShipIntent, ShipStats};
