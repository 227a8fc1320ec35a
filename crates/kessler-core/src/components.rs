//! ECS components for hecs entities.
//!
//! Components are plain data. Every orbiting entity carries an
//! [`ObjectId`](crate::types::ObjectId), an
//! [`OrbitalPosition`](crate::types::OrbitalPosition) and [`Radii`], plus
//! exactly one of [`Satellite`], [`Debris`] or [`Drv`]. Satellites and DRVs
//! also carry an [`Age`].

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::ObjectId;

/// Turns since launch (or since the last refuel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub turns: u32,
}

/// Rendering and capture envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Radii {
    pub collision: f64,
    pub capture: f64,
}

impl Radii {
    pub const SATELLITE: Radii = Radii {
        collision: SATELLITE_COLLISION_RADIUS,
        capture: SATELLITE_CAPTURE_RADIUS,
    };
    pub const DEBRIS: Radii = Radii {
        collision: DEBRIS_COLLISION_RADIUS,
        capture: DEBRIS_CAPTURE_RADIUS,
    };
    pub const DRV: Radii = Radii {
        collision: DRV_COLLISION_RADIUS,
        capture: DRV_CAPTURE_RADIUS,
    };
}

/// An operational (or retired) satellite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub purpose: SatellitePurpose,
    pub insurance: InsuranceTier,
    /// Set once a geotug has parked it in the graveyard orbit.
    pub in_graveyard: bool,
}

/// A piece of debris.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris {
    pub kind: DebrisKind,
}

/// Launch-time parameters of a DRV. Fixed for the vehicle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrvSpec {
    capacity: u32,
    success_rate: f64,
    max_age: u32,
}

impl DrvSpec {
    pub fn new(capacity: u32, success_rate: f64, max_age: u32) -> Self {
        Self {
            capacity,
            success_rate: success_rate.clamp(0.0, 1.0),
            max_age,
        }
    }

    /// Removal attempts per turn (uncooperative) or objects per cycle.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }
}

/// Debris removal vehicle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drv {
    pub drv_type: DrvType,
    pub priority: DrvPriority,
    pub spec: DrvSpec,
    /// Objects this vehicle has removed over its lifetime.
    pub debris_removed: u32,
    pub target: Option<ObjectId>,
    pub captured: Option<ObjectId>,
    pub targeting_turns_remaining: u32,
    pub capture_orbits_remaining: u32,
}

impl Drv {
    pub fn new(drv_type: DrvType, priority: DrvPriority, spec: DrvSpec) -> Self {
        Self {
            drv_type,
            priority,
            spec,
            debris_removed: 0,
            target: None,
            captured: None,
            targeting_turns_remaining: 0,
            capture_orbits_remaining: 0,
        }
    }

    pub fn phase(&self) -> DrvPhase {
        if self.captured.is_some() {
            DrvPhase::Holding
        } else if self.target.is_some() {
            DrvPhase::Targeting
        } else {
            DrvPhase::Seeking
        }
    }

    /// Whatever this vehicle currently claims, target or capture.
    pub fn claim(&self) -> Option<ObjectId> {
        self.captured.or(self.target)
    }

    /// Drop any claim and return to seeking.
    pub fn release(&mut self) {
        self.target = None;
        self.captured = None;
        self.targeting_turns_remaining = 0;
        self.capture_orbits_remaining = 0;
    }
}
