//! Simulation engine for CONQUEST.
//!
//! Owns the hecs ECS world, the planet arena and the operator registry,
//! runs systems at a fixed tick rate, and produces GameStateSnapshots for
//! the front end.

pub mod abilities;
pub mod combat;
pub mod engine;
pub mod operator;
pub mod planet;
pub mod scenario;
pub mod ship;
pub mod systems;
pub mod world_setup;

pub use conquest_core as core;
pub use engine::SimulationEngine;
