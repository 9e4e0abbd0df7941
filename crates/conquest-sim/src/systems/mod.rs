//! Systems that operate on the simulation each tick.
//!
//! Systems are free functions over the world and the arenas the engine owns.
//! They do not own state.

pub mod bot;
pub mod cleanup;
pub mod movement;
pub mod production;
pub mod projectile;
pub mod snapshot;
