//! Simulation engine for KESSLER.
//!
//! Owns the hecs ECS world, runs the per-turn systems in their required
//! order, and produces `WorldSnapshot`s for host collaborators.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use kessler_core as core;

#[cfg(test)]
mod tests;
