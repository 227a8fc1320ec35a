//! Core types and definitions for the KESSLER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, configuration, errors, missions, snapshots,
//! events, and constants. It has no dependency on the ECS or the RNG.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod missions;
pub mod state;
pub mod types;
