//! Headless conquest runner.
//!
//! This crate wires the simulation crates together behind a command-line
//! front end: it loads rules and scenarios, drives the engine either flat out
//! or on a paced game-loop thread, and reports what happened through
//! `tracing`.

pub mod cli;
pub mod game_loop;
pub mod runner;
pub mod state;

pub use conquest_core as core;
