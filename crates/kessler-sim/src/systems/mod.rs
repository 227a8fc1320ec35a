//! ECS systems that operate on the simulation world each turn.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only
//! passes). Engine-level bookkeeping such as counters and event logs is
//! passed in explicitly; systems keep no state of their own.

pub mod claims;
pub mod collision;
pub mod decommission;
pub mod drv_ops;
pub mod economy;
pub mod hazard;
pub mod missions;
pub mod movement;
pub mod risk;
pub mod scoring;
pub mod snapshot;
pub mod terminal;
