//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Orbital shell an object occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrbitLayer {
    Leo,
    Meo,
    Geo,
    /// Disposal orbit above GEO. Nothing collides here.
    Graveyard,
}

impl OrbitLayer {
    /// Layers scanned by the collision detector.
    pub const COLLIDABLE: [OrbitLayer; 3] = [OrbitLayer::Leo, OrbitLayer::Meo, OrbitLayer::Geo];

    /// Inclusive secondary-coordinate band `(min, max)`.
    pub fn y_band(self) -> (f64, f64) {
        match self {
            OrbitLayer::Leo => LEO_Y_BAND,
            OrbitLayer::Meo => MEO_Y_BAND,
            OrbitLayer::Geo => GEO_Y_BAND,
            OrbitLayer::Graveyard => GRAVEYARD_Y_BAND,
        }
    }

    /// Angular distance covered per turn before jitter.
    pub fn base_speed(self) -> f64 {
        match self {
            OrbitLayer::Leo => LEO_BASE_SPEED,
            OrbitLayer::Meo => MEO_BASE_SPEED,
            OrbitLayer::Geo => GEO_BASE_SPEED,
            OrbitLayer::Graveyard => GRAVEYARD_BASE_SPEED,
        }
    }

    pub fn is_collision_immune(self) -> bool {
        self == OrbitLayer::Graveyard
    }

    /// Clamp a secondary coordinate into this layer's band.
    pub fn clamp_y(self, y: f64) -> f64 {
        let (lo, hi) = self.y_band();
        y.clamp(lo, hi)
    }
}

/// What a satellite does; decides its per-turn revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SatellitePurpose {
    Weather,
    Comms,
    Gps,
}

impl SatellitePurpose {
    pub const ALL: [SatellitePurpose; 3] = [
        SatellitePurpose::Weather,
        SatellitePurpose::Comms,
        SatellitePurpose::Gps,
    ];

    pub fn revenue_per_turn(self) -> i64 {
        match self {
            SatellitePurpose::Weather => REVENUE_WEATHER,
            SatellitePurpose::Comms => REVENUE_COMMS,
            SatellitePurpose::Gps => REVENUE_GPS,
        }
    }
}

/// Insurance cover bought at launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceTier {
    #[default]
    None,
    Basic,
    Premium,
}

impl InsuranceTier {
    pub fn premium_cost(self) -> i64 {
        match self {
            InsuranceTier::None => 0,
            InsuranceTier::Basic => INSURANCE_BASIC_COST,
            InsuranceTier::Premium => INSURANCE_PREMIUM_COST,
        }
    }

    /// Fixed payout credited when an insured satellite is destroyed.
    pub fn payout(self) -> i64 {
        match self {
            InsuranceTier::None => 0,
            InsuranceTier::Basic => INSURANCE_BASIC_PAYOUT,
            InsuranceTier::Premium => INSURANCE_PREMIUM_PAYOUT,
        }
    }
}

/// Debris category; decides which DRV type can remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebrisKind {
    Cooperative,
    Uncooperative,
}

/// Debris removal vehicle behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrvType {
    /// Multi-turn capture of satellites and cooperative debris.
    Cooperative,
    /// Direct per-turn removal rolls against uncooperative debris.
    Uncooperative,
    /// Tows GEO satellites up to the graveyard orbit.
    Geotug,
    /// Services ageing satellites and DRVs.
    Refueling,
}

/// Launch priority. High priority costs more and tunes the vehicle better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrvPriority {
    #[default]
    Normal,
    High,
}

/// Where a DRV is in its capture cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrvPhase {
    /// No target, no capture.
    #[default]
    Seeking,
    /// Closing on a claimed target.
    Targeting,
    /// Holding a captured object.
    Holding,
}

/// Game difficulty chosen at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Top-level engine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine built, `initialize_game` not yet called.
    #[default]
    Setup,
    Active,
    GameOver,
}

/// Debris density classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    Critical,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverReason {
    BudgetDepleted,
    MaxTurnsReached,
    DebrisLimitExceeded,
    SevereCascade,
}

impl GameOverReason {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOverReason::BudgetDepleted => "budget-depleted",
            GameOverReason::MaxTurnsReached => "max-turns-reached",
            GameOverReason::DebrisLimitExceeded => "debris-limit-exceeded",
            GameOverReason::SevereCascade => "severe-cascade",
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade derived from the total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    #[default]
    D,
}

/// Mission progress semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingType {
    Cumulative,
    Threshold,
    Consecutive,
    Snapshot,
    Boolean,
}

/// Mission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    Active,
    Completed,
    Failed,
}
