//! Score derivation.
//!
//! The score is a pure function of world state: it is recomputed from
//! scratch after every state-changing command rather than accumulated.

use hecs::World;
use serde::{Deserialize, Serialize};

use kessler_core::components::Satellite;
use kessler_core::constants::*;
use kessler_core::enums::{Grade, OrbitLayer};
use kessler_core::state::{ScoreBreakdown, WorldStats};
use kessler_core::types::OrbitalPosition;

/// Everything the score depends on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreInput {
    pub leo_satellites: u32,
    pub meo_satellites: u32,
    pub geo_satellites: u32,
    pub stats: WorldStats,
    pub budget: i64,
    pub day: u64,
}

pub fn gather_input(world: &World, stats: &WorldStats, budget: i64, day: u64) -> ScoreInput {
    let mut input = ScoreInput {
        stats: *stats,
        budget,
        day,
        ..ScoreInput::default()
    };
    for (_entity, (pos, sat)) in world.query::<(&OrbitalPosition, &Satellite)>().iter() {
        if sat.in_graveyard {
            continue;
        }
        match pos.layer {
            OrbitLayer::Leo => input.leo_satellites += 1,
            OrbitLayer::Meo => input.meo_satellites += 1,
            OrbitLayer::Geo => input.geo_satellites += 1,
            OrbitLayer::Graveyard => {}
        }
    }
    input
}

/// Step multiplier for survival: the highest day threshold reached.
pub fn survival_multiplier(day: u64) -> f64 {
    SURVIVAL_MULTIPLIER_STEPS
        .iter()
        .find(|(threshold, _)| day >= *threshold)
        .map_or(1.0, |&(_, multiplier)| multiplier)
}

pub fn grade_for(total: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| total >= *threshold)
        .map_or(Grade::D, |&(_, grade)| grade)
}

pub fn compute(input: &ScoreInput) -> ScoreBreakdown {
    let satellite = f64::from(input.leo_satellites) * (SCORE_SATELLITE_BASE + SCORE_LAYER_BONUS_LEO)
        + f64::from(input.meo_satellites) * (SCORE_SATELLITE_BASE + SCORE_LAYER_BONUS_MEO)
        + f64::from(input.geo_satellites) * (SCORE_SATELLITE_BASE + SCORE_LAYER_BONUS_GEO);

    let debris_removal = f64::from(input.stats.debris_removed_cooperative)
        * SCORE_COOPERATIVE_REMOVAL
        + f64::from(input.stats.debris_removed_uncooperative) * SCORE_UNCOOPERATIVE_REMOVAL;

    let recovery = f64::from(input.stats.satellites_recovered) * SCORE_RECOVERY;

    let budget = input.budget.max(0) as f64 / 1_000_000.0 * SCORE_BUDGET_MULTIPLIER;

    let survival = input.day as f64 * SCORE_SURVIVAL_PER_DAY * survival_multiplier(input.day);

    let total = satellite + debris_removal + recovery + budget + survival;

    ScoreBreakdown {
        satellite,
        debris_removal,
        recovery,
        budget,
        survival,
        total,
        grade: grade_for(total),
    }
}
