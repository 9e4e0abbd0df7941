//! Bot AI for CONQUEST.
//!
//! Difficulty profiles and the per-decision planner that reinforces weak
//! planets and opens attack edges. Pure functions on plain data; the
//! simulation crate turns the resulting orders into targeting edges.

pub mod planner;
pub mod profiles;

pub use conquest_core as core;
