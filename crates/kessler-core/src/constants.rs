//! Simulation constants and tuning parameters.
//!
//! Everything a host may want to retune at runtime lives in
//! [`GameConfig`](crate::config::GameConfig) instead; these are the fixed rules.

use crate::enums::{Difficulty, DrvType, OrbitLayer};

// --- Angular model ---

/// Angular positions wrap at this value.
pub const ORBIT_CIRCUMFERENCE: f64 = 100.0;

/// Degrees per unit of angular position.
pub const DEGREES_PER_UNIT: f64 = 360.0 / ORBIT_CIRCUMFERENCE;

/// Per-entity speed jitter range, derived from the id.
pub const JITTER_MIN: f64 = 0.7;
pub const JITTER_MAX: f64 = 1.3;

// --- Layers ---

pub const LEO_Y_BAND: (f64, f64) = (5.0, 25.0);
pub const MEO_Y_BAND: (f64, f64) = (35.0, 55.0);
pub const GEO_Y_BAND: (f64, f64) = (65.0, 80.0);
pub const GRAVEYARD_Y_BAND: (f64, f64) = (88.0, 96.0);

pub const LEO_BASE_SPEED: f64 = 1.6;
pub const MEO_BASE_SPEED: f64 = 1.0;
pub const GEO_BASE_SPEED: f64 = 0.5;
pub const GRAVEYARD_BASE_SPEED: f64 = 0.2;

// --- Radii ---

pub const SATELLITE_COLLISION_RADIUS: f64 = 1.0;
pub const SATELLITE_CAPTURE_RADIUS: f64 = 2.0;
pub const DEBRIS_COLLISION_RADIUS: f64 = 0.5;
pub const DEBRIS_CAPTURE_RADIUS: f64 = 1.0;
pub const DRV_COLLISION_RADIUS: f64 = 1.0;
pub const DRV_CAPTURE_RADIUS: f64 = 3.0;

// --- Satellites ---

/// Nominal design life in turns; the refueling threshold is measured against it.
pub const SATELLITE_DESIGN_LIFE: u32 = 120;

pub const LAUNCH_COST_LEO: i64 = 2_000_000;
pub const LAUNCH_COST_MEO: i64 = 5_000_000;
pub const LAUNCH_COST_GEO: i64 = 10_000_000;

pub const INSURANCE_BASIC_COST: i64 = 500_000;
pub const INSURANCE_PREMIUM_COST: i64 = 1_500_000;
pub const INSURANCE_BASIC_PAYOUT: i64 = 3_000_000;
pub const INSURANCE_PREMIUM_PAYOUT: i64 = 8_000_000;

/// Launch cost by destination; nothing launches straight into the graveyard.
pub fn satellite_launch_cost(layer: OrbitLayer) -> Option<i64> {
    match layer {
        OrbitLayer::Leo => Some(LAUNCH_COST_LEO),
        OrbitLayer::Meo => Some(LAUNCH_COST_MEO),
        OrbitLayer::Geo => Some(LAUNCH_COST_GEO),
        OrbitLayer::Graveyard => None,
    }
}

pub const REVENUE_WEATHER: i64 = 40_000;
pub const REVENUE_COMMS: i64 = 60_000;
pub const REVENUE_GPS: i64 = 80_000;

// --- DRVs ---

/// Turns spent closing on a target before capture.
pub const TARGETING_TURNS: u32 = 2;

/// Orbits a captured object is held before the operation completes.
pub const CAPTURE_ORBITS: u32 = 3;

/// Charged per live DRV per turn.
pub const DRV_UPKEEP_PER_TURN: i64 = 25_000;

/// Cost multiplier for high-priority launches.
pub const HIGH_PRIORITY_COST_FACTOR: f64 = 1.5;

/// Success-rate bonus for high-priority launches.
pub const HIGH_PRIORITY_SUCCESS_BONUS: f64 = 0.1;

/// Success rates never exceed this after bonuses.
pub const MAX_SUCCESS_RATE: f64 = 0.99;

/// Fraction of `max_age` after which an object is eligible for refueling.
pub const REFUEL_AGE_FRACTION: f64 = 0.5;

pub fn drv_launch_cost(drv_type: DrvType) -> i64 {
    match drv_type {
        DrvType::Cooperative => 4_000_000,
        DrvType::Uncooperative => 6_000_000,
        DrvType::Geotug => 9_000_000,
        DrvType::Refueling => 5_000_000,
    }
}

// --- Collisions ---

/// Pair count at which a collision pass counts as a cascade.
pub const CASCADE_THRESHOLD: u32 = 3;

/// Pair count at which a collision pass ends the game.
pub const SEVERE_CASCADE_THRESHOLD: u32 = 12;

pub const LEO_COLLISION_THRESHOLD: f64 = 2.0;
pub const MEO_COLLISION_THRESHOLD: f64 = 2.5;
pub const GEO_COLLISION_THRESHOLD: f64 = 3.0;

pub const DEFAULT_ANGLE_THRESHOLD_DEG: f64 = 12.0;
pub const DEFAULT_DEBRIS_PER_COLLISION: u32 = 3;
pub const DEFAULT_COOPERATIVE_DEBRIS_RATIO: f64 = 0.7;
pub const DEFAULT_SPAWN_JITTER: f64 = 1.5;

/// Collision events older than this many turns are pruned.
pub const COLLISION_EVENT_TTL: u64 = 25;

/// Hard cap on retained collision events.
pub const MAX_COLLISION_EVENTS: usize = 200;

// --- History ---

/// Hard cap on retained turn history samples.
pub const MAX_TURN_HISTORY: usize = 500;

// --- Hazards ---

pub const DEFAULT_SOLAR_STORM_PROBABILITY: f64 = 0.05;
pub const DEFAULT_SOLAR_STORM_FRACTION: f64 = 0.3;

// --- Risk ---

/// Debris count at which risk becomes MEDIUM.
pub const RISK_MEDIUM_DEBRIS: usize = 50;

/// Debris count at which risk becomes CRITICAL.
pub const RISK_CRITICAL_DEBRIS: usize = 100;

// --- Limits ---

pub const DEFAULT_DEBRIS_LIMIT: usize = 250;

// --- Economy ---

pub const DEFAULT_BUDGET_DRAIN_PER_TURN: i64 = 150_000;
pub const DEFAULT_BUDGET_INCOME_PER_TURN: i64 = 0;

// --- Scoring ---

pub const SCORE_SATELLITE_BASE: f64 = 100.0;
pub const SCORE_LAYER_BONUS_LEO: f64 = 10.0;
pub const SCORE_LAYER_BONUS_MEO: f64 = 25.0;
pub const SCORE_LAYER_BONUS_GEO: f64 = 50.0;
pub const SCORE_COOPERATIVE_REMOVAL: f64 = 50.0;
pub const SCORE_UNCOOPERATIVE_REMOVAL: f64 = 80.0;
pub const SCORE_RECOVERY: f64 = 120.0;
pub const SCORE_BUDGET_MULTIPLIER: f64 = 10.0;
pub const SCORE_SURVIVAL_PER_DAY: f64 = 5.0;

/// `(min_days, multiplier)`, highest first.
pub const SURVIVAL_MULTIPLIER_STEPS: [(u64, f64); 3] = [(365, 3.0), (200, 2.0), (100, 1.5)];

/// `(min_total, grade)`, highest first. Anything below the last rung is D.
pub const GRADE_THRESHOLDS: [(f64, crate::enums::Grade); 4] = [
    (20_000.0, crate::enums::Grade::S),
    (12_000.0, crate::enums::Grade::A),
    (6_000.0, crate::enums::Grade::B),
    (2_500.0, crate::enums::Grade::C),
];

// --- Difficulty ---

/// Starting conditions per difficulty.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyProfile {
    pub starting_budget: i64,
    pub starting_satellites: u32,
    pub starting_debris: u32,
    pub max_steps: u64,
}

pub fn difficulty_profile(difficulty: Difficulty) -> DifficultyProfile {
    match difficulty {
        Difficulty::Easy => DifficultyProfile {
            starting_budget: 200_000_000,
            starting_satellites: 8,
            starting_debris: 15,
            max_steps: 300,
        },
        Difficulty::Normal => DifficultyProfile {
            starting_budget: 120_000_000,
            starting_satellites: 10,
            starting_debris: 30,
            max_steps: 250,
        },
        Difficulty::Hard => DifficultyProfile {
            starting_budget: 60_000_000,
            starting_satellites: 12,
            starting_debris: 50,
            max_steps: 200,
        },
    }
}
