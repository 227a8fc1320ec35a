//! Per-turn cash flow.

use hecs::World;

use kessler_core::components::{Drv, Satellite};
use kessler_core::config::EconomySettings;
use kessler_core::constants::DRV_UPKEEP_PER_TURN;

/// Revenue from operating satellites. Graveyard satellites earn nothing.
pub fn satellite_revenue(world: &World) -> i64 {
    world
        .query::<&Satellite>()
        .iter()
        .filter(|(_, sat)| !sat.in_graveyard)
        .map(|(_, sat)| sat.purpose.revenue_per_turn())
        .sum()
}

pub fn drv_upkeep(world: &World) -> i64 {
    let count = world.query::<&Drv>().iter().count() as i64;
    count * DRV_UPKEEP_PER_TURN
}

/// Net budget change for one turn.
pub fn turn_cash_flow(world: &World, economy: &EconomySettings) -> i64 {
    economy.budget_income_per_turn - economy.budget_drain_per_turn + satellite_revenue(world)
        - drv_upkeep(world)
}
