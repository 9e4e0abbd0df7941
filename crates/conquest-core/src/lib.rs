//! Core types and definitions for the CONQUEST simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, components, commands, state snapshots, events, constants,
//! tunable configuration and the modifier/event seams the simulation
//! consumes. It contains no simulation logic.

pub mod abilities;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod modifiers;
pub mod planet_types;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
