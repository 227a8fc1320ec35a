//! Debris-density risk classification.

use kessler_core::config::RiskMultipliers;
use kessler_core::constants::{RISK_CRITICAL_DEBRIS, RISK_MEDIUM_DEBRIS};
use kessler_core::enums::RiskLevel;

pub fn calculate_risk_level(debris_count: usize) -> RiskLevel {
    if debris_count < RISK_MEDIUM_DEBRIS {
        RiskLevel::Low
    } else if debris_count < RISK_CRITICAL_DEBRIS {
        RiskLevel::Medium
    } else {
        RiskLevel::Critical
    }
}

/// Factor a host applies to its inter-turn delay at `level`.
pub fn interval_multiplier(level: RiskLevel, multipliers: &RiskMultipliers) -> f64 {
    multipliers.for_level(level)
}
