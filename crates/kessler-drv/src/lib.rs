//! Debris removal vehicle behavior for KESSLER.
//!
//! Implements per-type vehicle profiles, target eligibility, and the
//! Seeking → Targeting → Holding capture cycle as pure functions over
//! plain data.

pub mod fsm;
pub mod profiles;
pub mod targeting;

pub use kessler_core as core;
