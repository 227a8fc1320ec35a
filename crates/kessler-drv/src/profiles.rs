//! Type-specific vehicle profiles.
//!
//! Consolidates per-type launch parameters for the DRV state machine.

use kessler_core::components::DrvSpec;
use kessler_core::constants::*;
use kessler_core::enums::{DrvPriority, DrvType, OrbitLayer};

/// Behavioral profile for a DRV type.
pub struct DrvBehaviorProfile {
    /// Removal attempts per turn (uncooperative) or objects per cycle.
    pub capacity: u32,
    /// Probability that a removal roll succeeds.
    pub success_rate: f64,
    /// Age (turns) past which the vehicle is decommissioned when idle.
    pub max_age: u32,
    /// Whether the type runs the multi-turn targeting/holding cycle.
    pub multi_turn_capture: bool,
    /// Layers the type may be launched into.
    pub layers: &'static [OrbitLayer],
}

const ACTIVE_LAYERS: &[OrbitLayer] = &[OrbitLayer::Leo, OrbitLayer::Meo, OrbitLayer::Geo];
const GEO_ONLY: &[OrbitLayer] = &[OrbitLayer::Geo];

/// Get the behavioral profile for a given type.
pub fn get_profile(drv_type: DrvType) -> DrvBehaviorProfile {
    match drv_type {
        DrvType::Cooperative => DrvBehaviorProfile {
            capacity: 1,
            success_rate: 0.85,
            max_age: 60,
            multi_turn_capture: true,
            layers: ACTIVE_LAYERS,
        },
        DrvType::Uncooperative => DrvBehaviorProfile {
            capacity: 2,
            success_rate: 0.60,
            max_age: 50,
            multi_turn_capture: false,
            layers: ACTIVE_LAYERS,
        },
        DrvType::Geotug => DrvBehaviorProfile {
            capacity: 1,
            success_rate: 1.0,
            max_age: 80,
            multi_turn_capture: true,
            layers: GEO_ONLY,
        },
        DrvType::Refueling => DrvBehaviorProfile {
            capacity: 1,
            success_rate: 1.0,
            max_age: 90,
            multi_turn_capture: true,
            layers: ACTIVE_LAYERS,
        },
    }
}

/// Whether a type may be launched into `layer`.
pub fn can_operate_in(drv_type: DrvType, layer: OrbitLayer) -> bool {
    get_profile(drv_type).layers.contains(&layer)
}

/// Fixed launch parameters for a new vehicle.
pub fn spec_for(drv_type: DrvType, priority: DrvPriority) -> DrvSpec {
    let profile = get_profile(drv_type);
    let success_rate = match priority {
        DrvPriority::Normal => profile.success_rate,
        // Bonus is capped, but never below the base rate.
        DrvPriority::High => (profile.success_rate + HIGH_PRIORITY_SUCCESS_BONUS)
            .min(MAX_SUCCESS_RATE.max(profile.success_rate)),
    };
    DrvSpec::new(profile.capacity, success_rate, profile.max_age)
}

pub fn launch_cost(drv_type: DrvType, priority: DrvPriority) -> i64 {
    let base = drv_launch_cost(drv_type);
    match priority {
        DrvPriority::Normal => base,
        DrvPriority::High => (base as f64 * HIGH_PRIORITY_COST_FACTOR).round() as i64,
    }
}
